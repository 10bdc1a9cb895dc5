//! Freshness-biased picks over the post history.

use crate::models::{History, Mode, Post};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const CALLBACK_MIN_POSTS: usize = 7;
pub const CALLBACK_MIN_AGE_DAYS: i64 = 7;
pub const CALLBACK_MAX_AGE_DAYS: i64 = 21;
pub const CALLBACK_CHANCE: f64 = 0.3;
pub const CONTEXT_WINDOW_DAYS: i64 = 14;
pub const CONTEXT_MAX_ITEMS: usize = 10;
pub const SUMMARY_PREVIEW_CHARS: usize = 200;

/// Random option not in `recently_used`, or any option once they are all used.
/// Only `None` when `options` is empty.
pub fn pick_fresh<'a, T, R>(options: &'a [T], recently_used: &[String], rng: &mut R) -> Option<&'a T>
where
    T: AsRef<str>,
    R: Rng + ?Sized,
{
    let fresh: Vec<&T> = options
        .iter()
        .filter(|o| !recently_used.iter().any(|used| used == o.as_ref()))
        .collect();

    match fresh.choose(rng) {
        Some(choice) => Some(*choice),
        None => options.choose(rng),
    }
}

/// Whole days between `date` and `now`.
pub fn age_in_days(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_days()
}

pub fn recent_posts(history: &History, window_days: i64, now: DateTime<Utc>) -> Vec<&Post> {
    history
        .posts
        .iter()
        .filter(|p| age_in_days(p.date, now) <= window_days)
        .collect()
}

/// An older fact post to reference, aged one to three weeks.
pub fn callback_candidate<'a, R: Rng + ?Sized>(
    history: &'a History,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Post> {
    if history.posts.len() < CALLBACK_MIN_POSTS {
        return None;
    }

    let candidates: Vec<&Post> = history
        .posts
        .iter()
        .filter(|p| p.mode == Mode::Fact)
        .filter(|p| {
            (CALLBACK_MIN_AGE_DAYS..=CALLBACK_MAX_AGE_DAYS).contains(&age_in_days(p.date, now))
        })
        .collect();

    candidates.choose(rng).copied()
}

pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Digest of the latest posts for prompt context, empty if none are recent.
pub fn context_block(
    history: &History,
    now: DateTime<Utc>,
    window_days: i64,
    max_items: usize,
) -> String {
    let recent = recent_posts(history, window_days, now);
    if recent.is_empty() {
        return String::new();
    }

    let skip = recent.len().saturating_sub(max_items);
    let mut lines = vec!["<recent_posts>".to_string()];
    for post in &recent[skip..] {
        lines.push(format!(
            "[{}] ({}) {}: {}",
            post.date.format("%Y-%m-%d"),
            post.mode,
            post.topic,
            preview(&post.summary, SUMMARY_PREVIEW_CHARS)
        ));
    }
    lines.push("</recent_posts>".to_string());

    lines.join("\n")
}
