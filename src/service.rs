use crate::commands::Command;
use crate::error::Result;
use crate::file_logger::FileLogger;
use crate::generator::Generator;
use crate::history::HistoryStore;
use crate::models::{Mode, Post};
use crate::render::{self, MessageSink, Rendered, COLOR_CONNECTIONS, COLOR_PUZZLE};
use crate::router;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{error, info};

pub const NO_MANUAL_ANSWER: &str = "No recent puzzle to answer!";
pub const NO_HISTORY: &str = "No posting history yet!";
const MISSING_ANSWER: &str = "No answer available";

/// What a command sends back to the channel it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Rendered),
}

pub struct PostService {
    generator: Generator,
    store: HistoryStore,
    sink: Arc<dyn MessageSink>,
    journal: Option<Arc<FileLogger>>,
}

impl PostService {
    pub fn new(
        generator: Generator,
        store: HistoryStore,
        sink: Arc<dyn MessageSink>,
        journal: Option<Arc<FileLogger>>,
    ) -> Self {
        Self {
            generator,
            store,
            sink,
            journal,
        }
    }

    pub async fn daily_post(&self) -> Result<Post> {
        let mut rng = StdRng::from_entropy();
        self.daily_post_at(Utc::now(), &mut rng).await
    }

    /// Load history, generate, deliver, then record. Nothing is written unless
    /// delivery succeeds.
    pub async fn daily_post_at<R: Rng + Send>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Post> {
        let result = self.try_daily_post(now, rng).await;
        if let Err(e) = &result {
            error!("Daily post failed, history left untouched: {}", e);
            self.journal(|j| j.log_error(&format!("daily post: {e}")));
        }
        result
    }

    async fn try_daily_post<R: Rng + Send>(&self, now: DateTime<Utc>, rng: &mut R) -> Result<Post> {
        let mut history = self.store.load()?;
        let revealing = history.pending_puzzle_answer.clone();

        let scheduled = router::run_scheduled(&self.generator, &mut history, now, rng).await?;
        self.sink.send(&scheduled.rendered).await?;

        info!(
            "Posted {} about {}",
            scheduled.post.mode, scheduled.post.topic
        );
        self.journal(|j| {
            if let Some(answer) = &revealing {
                j.log_answer_reveal(answer);
            }
            j.log_post(scheduled.post.mode.as_str(), &scheduled.post.topic);
        });

        let post = scheduled.post.clone();
        self.store.append(history, scheduled.post)?;
        Ok(post)
    }

    pub async fn handle_command(&self, command: Command, requester: &str) -> Result<Reply> {
        let mut rng = StdRng::from_entropy();
        self.handle_command_at(command, requester, Utc::now(), &mut rng)
            .await
    }

    /// On-demand posts reuse the generators but are never added to the post log.
    pub async fn handle_command_at<R: Rng + Send>(
        &self,
        command: Command,
        requester: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Reply> {
        info!("Command !{} from {}", command.name(), requester);
        self.journal(|j| j.log_command(command.name(), requester));
        let requested_by = format!("Requested by {}", requester);

        let reply = match command {
            Command::Fact(Some(topic)) => {
                let content = self.generator.custom_fact(&topic).await?;
                Reply::Embed(
                    Rendered::new(
                        format!("Fact: {}", render::title_case(&topic)),
                        content,
                        render::color_for(Mode::Fact),
                    )
                    .at(now)
                    .footer(requested_by),
                )
            }
            Command::Fact(None) => {
                let history = self.store.load()?;
                let draft = self.generator.fact(&history, now, rng).await?;
                Reply::Embed(
                    Rendered::new(
                        format!("Fact: {}", render::title_case(&draft.topic)),
                        draft.content,
                        render::color_for(Mode::Fact),
                    )
                    .at(now)
                    .footer(requested_by),
                )
            }
            Command::WhatIf => {
                let history = self.store.load()?;
                let draft = self.generator.what_if(&history, now, rng).await?;
                Reply::Embed(
                    Rendered::new(
                        render::daily_title(Mode::WhatIf, &draft.topic),
                        draft.content,
                        render::color_for(Mode::WhatIf),
                    )
                    .at(now)
                    .footer(requested_by),
                )
            }
            Command::Puzzle => {
                let mut history = self.store.load()?;
                let draft = self.generator.puzzle(&history, now, rng).await?;

                // Separate from the daily pending slot; a newer !puzzle replaces it
                history.manual_puzzle_answer =
                    Some(draft.answer.unwrap_or_else(|| MISSING_ANSWER.to_string()));
                self.store.save(&history)?;

                Reply::Embed(
                    Rendered::new(
                        render::daily_title(Mode::Puzzle, &draft.topic),
                        draft.content,
                        COLOR_PUZZLE,
                    )
                    .at(now)
                    .footer(format!("{} | Answer: use !answer", requested_by)),
                )
            }
            Command::Answer => {
                let history = self.store.load()?;
                let answer = history
                    .manual_puzzle_answer
                    .unwrap_or_else(|| NO_MANUAL_ANSWER.to_string());
                Reply::Embed(Rendered::new("Puzzle Answer", answer, COLOR_CONNECTIONS))
            }
            Command::History(count) => {
                let history = self.store.load()?;
                let skip = history.posts.len().saturating_sub(count);
                let recent = &history.posts[skip..];
                if recent.is_empty() {
                    Reply::Text(NO_HISTORY.to_string())
                } else {
                    Reply::Embed(render::history_listing(recent))
                }
            }
            Command::Schedule => Reply::Embed(render::schedule()),
        };

        Ok(reply)
    }

    fn journal(&self, f: impl FnOnce(&FileLogger)) {
        if let Some(journal) = &self.journal {
            f(journal);
        }
    }
}
