use crate::error::Result;
use crate::models::{History, Post};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MAX_USED_WONDERS: usize = 5;
pub const MAX_USED_TOPICS: usize = 8;

impl History {
    /// Appends a post and rotates the recently-used windows. Does not persist.
    pub fn record(&mut self, post: Post) {
        if let Some(wonder) = post.wonder_type.as_deref().filter(|w| !w.is_empty()) {
            push_bounded(&mut self.used_wonder_types, wonder, MAX_USED_WONDERS);
        }
        if !post.topic.is_empty() {
            push_bounded(&mut self.used_topics, &post.topic, MAX_USED_TOPICS);
        }
        self.posts.push(post);
    }
}

fn push_bounded(window: &mut Vec<String>, value: &str, max: usize) {
    window.push(value.to_string());
    if window.len() > max {
        let excess = window.len() - max;
        window.drain(..excess);
    }
}

/// JSON file holding the bot's `History`. The whole document is rewritten on
/// every save; concurrent writers are not coordinated and the last one wins.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            debug!("No history at {}, starting fresh", self.path.display());
            return Ok(History::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(History::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, history: &History) -> Result<()> {
        let json = serde_json::to_string_pretty(history)?;

        // Write beside the target and rename so readers never see half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn append(&self, mut history: History, post: Post) -> Result<History> {
        info!("Recording {} post about {}", post.mode, post.topic);
        history.record(post);
        self.save(&history)?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;
    use chrono::Utc;

    fn post(topic: &str, wonder: Option<&str>) -> Post {
        Post {
            date: Utc::now(),
            mode: Mode::Fact,
            topic: topic.to_string(),
            wonder_type: wonder.map(str::to_string),
            summary: String::new(),
            content: "content".to_string(),
            answer: None,
            had_callback: Some(false),
        }
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        assert_eq!(store.load().unwrap(), History::default());
    }

    #[test]
    fn test_wonder_window_keeps_most_recent_five() {
        let mut history = History::default();
        for i in 0..7 {
            history.record(post("topology", Some(&format!("w{i}"))));
        }

        assert_eq!(history.used_wonder_types, vec!["w2", "w3", "w4", "w5", "w6"]);
        assert_eq!(history.posts.len(), 7);
    }

    #[test]
    fn test_wonder_window_shorter_than_bound() {
        let mut history = History::default();
        history.record(post("topology", Some("w0")));
        history.record(post("topology", None));
        history.record(post("topology", Some("w1")));

        assert_eq!(history.used_wonder_types, vec!["w0", "w1"]);
    }

    #[test]
    fn test_topic_window_keeps_most_recent_eight() {
        let mut history = History::default();
        for i in 0..10 {
            history.record(post(&format!("t{i}"), None));
        }

        assert_eq!(history.used_topics.len(), MAX_USED_TOPICS);
        assert_eq!(history.used_topics.first().map(String::as_str), Some("t2"));
        assert_eq!(history.used_topics.last().map(String::as_str), Some("t9"));
    }

    #[test]
    fn test_append_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let history = store
            .append(History::default(), post("black holes", Some("w")))
            .unwrap();

        assert_eq!(store.load().unwrap(), history);
    }

    #[test]
    fn test_resave_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let mut history = History::default();
        history.record(post("prime numbers", Some("w")));
        history.pending_puzzle_answer = Some("42".to_string());
        store.save(&history).unwrap();
        let first = fs::read(store.path()).unwrap();

        let reloaded = store.load().unwrap();
        store.save(&reloaded).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(reloaded, history);
        assert_eq!(first, second);
    }
}
