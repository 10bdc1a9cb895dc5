use crate::catalog::{CONNECTIONS_TOPIC, FALLBACK_TOPIC, TOPICS, WONDER_TYPES};
use crate::claude::{Completer, CONTENT_MAX_TOKENS, SUMMARY_MAX_TOKENS};
use crate::error::Result;
use crate::models::{Draft, History, Mode};
use crate::prompts;
use crate::selection::{
    age_in_days, callback_candidate, context_block, pick_fresh, preview, recent_posts,
    CALLBACK_CHANCE, CONTEXT_MAX_ITEMS, CONTEXT_WINDOW_DAYS, SUMMARY_PREVIEW_CHARS,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

pub const ANSWER_MARKER: &str = "ANSWER:";
pub const ANSWER_PLACEHOLDER: &str = "(Answer coming tomorrow)";

/// A weekly synthesis needs at least this many posts from the last week.
pub const CONNECTIONS_MIN_POSTS: usize = 3;
pub const CONNECTIONS_WINDOW_DAYS: i64 = 7;

/// Splits a puzzle reply into the puzzle and its held-back answer.
pub fn parse_puzzle(raw: &str) -> (String, String) {
    match raw.split_once(ANSWER_MARKER) {
        Some((puzzle, answer)) => (puzzle.trim().to_string(), answer.trim().to_string()),
        None => (raw.to_string(), ANSWER_PLACEHOLDER.to_string()),
    }
}

/// Builds posts from history context. `writer` drafts the posts and
/// `summarizer` condenses them for future prompts.
pub struct Generator {
    writer: Arc<dyn Completer>,
    summarizer: Arc<dyn Completer>,
}

impl Generator {
    pub fn new(writer: Arc<dyn Completer>, summarizer: Arc<dyn Completer>) -> Self {
        Self { writer, summarizer }
    }

    pub async fn generate<R: Rng + Send>(
        &self,
        mode: Mode,
        history: &History,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Draft> {
        info!("Generating {} post", mode);
        match mode {
            Mode::Fact => self.fact(history, now, rng).await,
            Mode::WhatIf => self.what_if(history, now, rng).await,
            Mode::Puzzle => self.puzzle(history, now, rng).await,
            Mode::Connections => self.connections(history, now, rng).await,
        }
    }

    pub async fn fact<R: Rng + Send>(
        &self,
        history: &History,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Draft> {
        let topic = fresh_topic(history, rng);
        let wonder = pick_fresh(WONDER_TYPES, &history.used_wonder_types, rng)
            .copied()
            .unwrap_or(WONDER_TYPES[0]);
        let context = context_block(history, now, CONTEXT_WINDOW_DAYS, CONTEXT_MAX_ITEMS);

        let callback = if rng.gen_bool(CALLBACK_CHANCE) {
            callback_candidate(history, now, rng)
        } else {
            None
        };
        let callback_text = callback
            .map(|post| prompts::callback(age_in_days(post.date, now), &post.summary))
            .unwrap_or_default();
        if let Some(post) = callback {
            debug!("Offering callback to {} post from {}", post.topic, post.date);
        }

        let prompt = prompts::fact(&context, topic, wonder, &callback_text);
        let content = self.writer.complete(&prompt, CONTENT_MAX_TOKENS).await?;
        let summary = self.summarize(&content).await?;

        Ok(Draft {
            mode: Mode::Fact,
            topic: topic.to_string(),
            wonder_type: Some(wonder.to_string()),
            summary,
            content,
            answer: None,
            had_callback: Some(callback.is_some()),
        })
    }

    /// Fact about a caller-chosen topic, bypassing history entirely.
    pub async fn custom_fact(&self, topic: &str) -> Result<String> {
        self.writer
            .complete(&prompts::custom_fact(topic), CONTENT_MAX_TOKENS)
            .await
    }

    pub async fn what_if<R: Rng + Send>(
        &self,
        history: &History,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Draft> {
        let topic = fresh_topic(history, rng);
        let context = context_block(history, now, CONTEXT_WINDOW_DAYS, CONTEXT_MAX_ITEMS);

        let prompt = prompts::what_if(&context, topic);
        let content = self.writer.complete(&prompt, CONTENT_MAX_TOKENS).await?;
        let summary = self.summarize(&content).await?;

        Ok(Draft {
            mode: Mode::WhatIf,
            topic: topic.to_string(),
            wonder_type: None,
            summary,
            content,
            answer: None,
            had_callback: None,
        })
    }

    pub async fn puzzle<R: Rng + Send>(
        &self,
        history: &History,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Draft> {
        let topic = fresh_topic(history, rng);
        let context = context_block(history, now, CONTEXT_WINDOW_DAYS, CONTEXT_MAX_ITEMS);

        let prompt = prompts::puzzle(&context, topic);
        let raw = self.writer.complete(&prompt, CONTENT_MAX_TOKENS).await?;
        let (content, answer) = parse_puzzle(&raw);
        let summary = self.summarize(&content).await?;

        Ok(Draft {
            mode: Mode::Puzzle,
            topic: topic.to_string(),
            wonder_type: None,
            summary,
            content,
            answer: Some(answer),
            had_callback: None,
        })
    }

    /// Ties the week's posts together, or falls back to a fact when the week is thin.
    pub async fn connections<R: Rng + Send>(
        &self,
        history: &History,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Draft> {
        let recent = recent_posts(history, CONNECTIONS_WINDOW_DAYS, now);
        if recent.len() < CONNECTIONS_MIN_POSTS {
            info!(
                "Only {} posts this week, posting a fact instead of connections",
                recent.len()
            );
            return self.fact(history, now, rng).await;
        }

        let digest = recent
            .iter()
            .map(|p| {
                format!(
                    "- ({}) {}: {}",
                    p.mode,
                    p.topic,
                    preview(&p.summary, SUMMARY_PREVIEW_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = prompts::connections(&digest);
        let content = self.writer.complete(&prompt, CONTENT_MAX_TOKENS).await?;
        let summary = self.summarize(&content).await?;

        Ok(Draft {
            mode: Mode::Connections,
            topic: CONNECTIONS_TOPIC.to_string(),
            wonder_type: None,
            summary,
            content,
            answer: None,
            had_callback: None,
        })
    }

    async fn summarize(&self, content: &str) -> Result<String> {
        let summary = self
            .summarizer
            .complete(&prompts::summary(content), SUMMARY_MAX_TOKENS)
            .await?;
        Ok(summary.trim().to_string())
    }
}

fn fresh_topic<R: Rng + ?Sized>(history: &History, rng: &mut R) -> &'static str {
    pick_fresh(TOPICS, &history.used_topics, rng)
        .copied()
        .unwrap_or(FALLBACK_TOPIC)
}
