use crate::catalog::{day_name, SCHEDULE};
use crate::error::Result;
use crate::models::{Mode, Post};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub const COLOR_FACT: u32 = 0x5865F2;
pub const COLOR_WHAT_IF: u32 = 0xEB459E;
pub const COLOR_PUZZLE: u32 = 0xFEE75C;
pub const COLOR_CONNECTIONS: u32 = 0x57F287;

pub const SCHEDULED_FOOTER: &str = "Powered by Claude";

/// A chat-ready message: one embed with optional footer and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub title: String,
    pub body: String,
    pub color: u32,
    pub timestamp: Option<DateTime<Utc>>,
    pub footer: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Rendered {
    pub fn new(title: impl Into<String>, body: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            color,
            timestamp: None,
            footer: None,
            fields: Vec::new(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// Where scheduled posts are delivered.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, message: &Rendered) -> Result<()>;
}

pub fn color_for(mode: Mode) -> u32 {
    match mode {
        Mode::Fact => COLOR_FACT,
        Mode::WhatIf => COLOR_WHAT_IF,
        Mode::Puzzle => COLOR_PUZZLE,
        Mode::Connections => COLOR_CONNECTIONS,
    }
}

pub fn daily_title(mode: Mode, topic: &str) -> String {
    match mode {
        Mode::Fact => format!("Daily Wonder: {}", title_case(topic)),
        Mode::WhatIf => "What If...?".to_string(),
        Mode::Puzzle => format!("Puzzle: {}", title_case(topic)),
        Mode::Connections => "Weekly Connections 🧵".to_string(),
    }
}

/// Scheduled post embed, with yesterday's answer shown ahead of the new content.
pub fn daily_post(post: &Post, revealed_answer: Option<&str>) -> Rendered {
    let body = match revealed_answer {
        Some(answer) => format!(
            "**Yesterday's puzzle answer:**\n{}\n\n---\n\n{}",
            answer, post.content
        ),
        None => post.content.clone(),
    };

    Rendered::new(daily_title(post.mode, &post.topic), body, color_for(post.mode))
        .at(post.date)
        .footer(SCHEDULED_FOOTER)
}

pub fn history_listing(posts: &[Post]) -> Rendered {
    let lines: Vec<String> = posts
        .iter()
        .rev()
        .map(|p| format!("`{}` **{}**: {}", p.date.format("%Y-%m-%d"), p.mode, p.topic))
        .collect();

    Rendered::new(
        format!("Last {} Posts", posts.len()),
        lines.join("\n"),
        COLOR_FACT,
    )
}

pub fn schedule() -> Rendered {
    let lines: Vec<String> = SCHEDULE
        .iter()
        .map(|(day, mode)| format!("**{}**: {}", day_name(*day), mode))
        .collect();

    Rendered::new("Weekly Schedule", lines.join("\n"), COLOR_FACT).field(
        "Commands",
        "`!fact [topic]` - Get a fact\n`!whatif` - Absurd hypothetical\n`!puzzle` / `!answer` - Puzzle mode\n`!history [n]` - Recent posts",
    )
}

/// Capitalizes the first letter of every word, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
