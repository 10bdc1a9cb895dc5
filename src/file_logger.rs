use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

/// Plain-text activity journal, one `[time] [ACTION] details` line per event.
pub struct FileLogger {
    file: Mutex<std::fs::File>,
}

impl FileLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn log(&self, action: &str, details: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{}] [{}] {}\n", timestamp, action, details);

        // Mirror to stdout for container logs
        print!("{}", line);

        if let Ok(mut file) = self.file.lock() {
            if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
                warn!("Activity log write failed: {}", e);
            }
        }
    }

    pub fn log_post(&self, mode: &str, topic: &str) {
        self.log("POST", &format!("{} about {}", mode, topic));
    }

    pub fn log_answer_reveal(&self, answer: &str) {
        self.log("ANSWER", answer);
    }

    pub fn log_command(&self, command: &str, requester: &str) {
        self.log("COMMAND", &format!("!{} by {}", command, requester));
    }

    pub fn log_error(&self, error: &str) {
        self.log("ERROR", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.log");

        let logger = FileLogger::new(&path).unwrap();
        logger.log_post("fact", "topology");
        logger.log_command("whatif", "ada");

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[POST] fact about topology"));
        assert!(lines[1].ends_with("[COMMAND] !whatif by ada"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_does_not_panic() {
        // Every write to /dev/full fails with ENOSPC
        let logger = FileLogger::new("/dev/full").unwrap();
        logger.log_error("disk is full");
    }
}
