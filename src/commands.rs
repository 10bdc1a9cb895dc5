//! `!`-prefixed chat commands.

pub const PREFIX: char = '!';
pub const DEFAULT_HISTORY_COUNT: usize = 5;
pub const MAX_HISTORY_COUNT: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!fact [topic]`
    Fact(Option<String>),
    /// `!whatif`
    WhatIf,
    /// `!puzzle`
    Puzzle,
    /// `!answer`
    Answer,
    /// `!history [n]`
    History(usize),
    /// `!schedule`
    Schedule,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix(PREFIX)?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "fact" if args.is_empty() => Some(Command::Fact(None)),
            "fact" => Some(Command::Fact(Some(args.to_string()))),
            "whatif" => Some(Command::WhatIf),
            "puzzle" => Some(Command::Puzzle),
            "answer" => Some(Command::Answer),
            "history" => {
                let count = args
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(DEFAULT_HISTORY_COUNT);
                Some(Command::History(count.clamp(1, MAX_HISTORY_COUNT)))
            }
            "schedule" => Some(Command::Schedule),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Fact(_) => "fact",
            Command::WhatIf => "whatif",
            Command::Puzzle => "puzzle",
            Command::Answer => "answer",
            Command::History(_) => "history",
            Command::Schedule => "schedule",
        }
    }

    /// Whether the command calls the model (and deserves a typing indicator).
    pub fn generates(&self) -> bool {
        matches!(self, Command::Fact(_) | Command::WhatIf | Command::Puzzle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fact() {
        assert_eq!(Command::parse("!fact"), Some(Command::Fact(None)));
        assert_eq!(
            Command::parse("!fact   black holes "),
            Some(Command::Fact(Some("black holes".to_string())))
        );
    }

    #[test]
    fn test_parse_history_count() {
        assert_eq!(Command::parse("!history"), Some(Command::History(5)));
        assert_eq!(Command::parse("!history 3"), Some(Command::History(3)));
        assert_eq!(Command::parse("!history lots"), Some(Command::History(5)));
        assert_eq!(Command::parse("!history 0"), Some(Command::History(1)));
        assert_eq!(Command::parse("!history 500"), Some(Command::History(25)));
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("!dance"), None);
        assert_eq!(Command::parse("!"), None);
        assert_eq!(Command::parse("!whatif"), Some(Command::WhatIf));
        assert_eq!(Command::parse("!schedule"), Some(Command::Schedule));
    }
}
