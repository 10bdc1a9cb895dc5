//! Scripted stand-ins for the model and the channel.

use crate::claude::Completer;
use crate::error::{Error, Result};
use crate::models::{Mode, Post};
use crate::render::{MessageSink, Rendered};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with queued responses in order, then with `fallback`.
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<Result<String>>>,
    fallback: String,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl ScriptedCompleter {
    pub fn new(fallback: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: fallback.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self) -> Self {
        self.replies.lock().unwrap().push_back(Err(Error::Api {
            status: 529,
            message: "overloaded".to_string(),
        }));
        self
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Rendered>>,
    broken: bool,
}

impl RecordingSink {
    pub fn broken() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn sent(&self) -> Vec<Rendered> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, message: &Rendered) -> Result<()> {
        if self.broken {
            return Err(Error::Delivery("channel unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn post_aged(now: DateTime<Utc>, days: i64, mode: Mode, topic: &str) -> Post {
    Post {
        date: now - Duration::days(days),
        mode,
        topic: topic.to_string(),
        wonder_type: None,
        summary: format!("summary of {topic}"),
        content: format!("content about {topic}"),
        answer: None,
        had_callback: None,
    }
}
