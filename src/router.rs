//! Picks today's mode and carries the puzzle answer over to the next post.

use crate::catalog::mode_for;
use crate::error::Result;
use crate::generator::Generator;
use crate::models::{History, Mode, Post};
use crate::render::{self, Rendered};
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use tracing::info;

pub struct ScheduledPost {
    pub post: Post,
    pub rendered: Rendered,
}

/// Generates today's post and updates the pending answer slot in `history`.
///
/// The slot is only touched once generation succeeds, so a failed run leaves
/// the previous answer waiting. A new puzzle overwrites any unrevealed answer.
/// The post itself is not recorded; the caller appends it after delivery.
pub async fn run_scheduled<R: Rng + Send>(
    generator: &Generator,
    history: &mut History,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ScheduledPost> {
    let mode = mode_for(now.weekday());
    info!("Scheduled {} post for {}", mode, now.weekday());

    let draft = generator.generate(mode, history, now, rng).await?;

    let revealed = history.pending_puzzle_answer.take();
    if draft.mode == Mode::Puzzle {
        history.pending_puzzle_answer = draft.answer.clone();
    }

    let post = draft.into_post(now);
    // Titled by the mode actually generated, so a thin-week Sunday fact is not labelled as connections
    let rendered = render::daily_post(&post, revealed.as_deref());
    Ok(ScheduledPost { post, rendered })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedCompleter;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    // 2026-10-16 is a Friday
    fn friday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 19, 0, 0).unwrap()
    }

    fn generator(writer: ScriptedCompleter) -> Generator {
        Generator::new(Arc::new(writer), Arc::new(ScriptedCompleter::new("summary")))
    }

    #[tokio::test]
    async fn test_puzzle_answer_revealed_next_day_once() {
        let gen = generator(
            ScriptedCompleter::new("Saturday fact 🌍").reply("Riddle?\n\nANSWER: Entropy."),
        );
        let mut history = History::default();
        let mut rng = StdRng::seed_from_u64(4);

        let friday_post = run_scheduled(&gen, &mut history, friday(), &mut rng)
            .await
            .unwrap();
        assert_eq!(friday_post.post.mode, Mode::Puzzle);
        assert_eq!(friday_post.rendered.body, "Riddle?");
        assert_eq!(history.pending_puzzle_answer.as_deref(), Some("Entropy."));
        history.record(friday_post.post);

        let saturday = friday() + chrono::Duration::days(1);
        let saturday_post = run_scheduled(&gen, &mut history, saturday, &mut rng)
            .await
            .unwrap();
        assert_eq!(saturday_post.post.mode, Mode::Fact);
        assert!(saturday_post
            .rendered
            .body
            .starts_with("**Yesterday's puzzle answer:**\nEntropy."));
        assert!(saturday_post.rendered.body.ends_with("Saturday fact 🌍"));
        assert_eq!(saturday_post.post.content, "Saturday fact 🌍");
        assert!(history.pending_puzzle_answer.is_none());
        history.record(saturday_post.post);

        let sunday = saturday + chrono::Duration::days(1);
        let sunday_post = run_scheduled(&gen, &mut history, sunday, &mut rng)
            .await
            .unwrap();
        assert!(!sunday_post.rendered.body.contains("Yesterday's puzzle answer"));
    }

    #[tokio::test]
    async fn test_new_puzzle_overwrites_unrevealed_answer() {
        let gen = generator(ScriptedCompleter::new("unused").reply("Next?\nANSWER: new"));
        let mut history = History {
            pending_puzzle_answer: Some("old".to_string()),
            ..History::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let post = run_scheduled(&gen, &mut history, friday(), &mut rng)
            .await
            .unwrap();

        assert!(post.rendered.body.contains("old"));
        assert_eq!(history.pending_puzzle_answer.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_pending_answer() {
        let gen = generator(ScriptedCompleter::new("unused").fail());
        let mut history = History {
            pending_puzzle_answer: Some("kept".to_string()),
            ..History::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let result = run_scheduled(&gen, &mut history, friday(), &mut rng).await;

        assert!(result.is_err());
        assert_eq!(history.pending_puzzle_answer.as_deref(), Some("kept"));
        assert!(history.posts.is_empty());
    }

    #[tokio::test]
    async fn test_thin_sunday_is_titled_as_fact() {
        let gen = generator(ScriptedCompleter::new("A Sunday fact"));
        let mut history = History::default();
        let mut rng = StdRng::seed_from_u64(4);

        let sunday = friday() + chrono::Duration::days(2);
        let post = run_scheduled(&gen, &mut history, sunday, &mut rng)
            .await
            .unwrap();

        assert_eq!(post.post.mode, Mode::Fact);
        assert!(post.rendered.title.starts_with("Daily Wonder: "));
        assert_eq!(post.rendered.color, render::COLOR_FACT);
    }
}
