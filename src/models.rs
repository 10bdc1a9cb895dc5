use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which generator produced a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Fact,
    WhatIf,
    Puzzle,
    Connections,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fact => "fact",
            Mode::WhatIf => "what_if",
            Mode::Puzzle => "puzzle",
            Mode::Connections => "connections",
        }
    }

    /// Unknown names fall back to `Fact`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "what_if" | "whatif" => Mode::WhatIf,
            "puzzle" => Mode::Puzzle,
            "connections" => Mode::Connections,
            _ => Mode::Fact,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.map(|n| Mode::from_name(&n)).unwrap_or_default())
    }
}

fn unknown_topic() -> String {
    "unknown".to_string()
}

/// One generated post as kept in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "unknown_topic")]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonder_type: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub had_callback: Option<bool>,
}

/// Generator output; becomes a `Post` once the caller stamps a date on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub mode: Mode,
    pub topic: String,
    pub wonder_type: Option<String>,
    pub summary: String,
    pub content: String,
    pub answer: Option<String>,
    pub had_callback: Option<bool>,
}

impl Draft {
    pub fn into_post(self, date: DateTime<Utc>) -> Post {
        Post {
            date,
            mode: self.mode,
            topic: self.topic,
            wonder_type: self.wonder_type,
            summary: self.summary,
            content: self.content,
            answer: self.answer,
            had_callback: self.had_callback,
        }
    }
}

/// The whole persisted bot state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default, rename = "used_wonders")]
    pub used_wonder_types: Vec<String>,
    #[serde(default)]
    pub used_topics: Vec<String>,
    /// Daily puzzle answer waiting for tomorrow's post. A newer puzzle overwrites it.
    #[serde(default)]
    pub pending_puzzle_answer: Option<String>,
    /// Answer to the last `!puzzle`, independent of the daily slot.
    #[serde(
        default,
        rename = "temp_answer",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_puzzle_answer: Option<String>,
}

/// Dates are written as RFC 3339. Naive timestamps (no offset) are read as UTC,
/// and anything unreadable becomes the epoch so one bad record can't block a load.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(parse(&raw).unwrap_or_else(|| {
            tracing::warn!("Unreadable post date {:?}, treating as epoch", raw);
            DateTime::<Utc>::default()
        }))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
