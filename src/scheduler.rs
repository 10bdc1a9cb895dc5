use crate::service::PostService;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Next occurrence of `post_time` (UTC) strictly after `now`.
pub fn next_fire(now: DateTime<Utc>, post_time: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(post_time).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Posts once a day at `post_time`. A failed day is logged and skipped.
pub async fn run_daily(service: Arc<PostService>, post_time: NaiveTime) {
    loop {
        let now = Utc::now();
        let fire_at = next_fire(now, post_time);
        info!("Next daily post at {}", fire_at);

        let wait = (fire_at - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        match service.daily_post().await {
            Ok(post) => info!("Daily {} post about {} delivered", post.mode, post.topic),
            Err(e) => error!("Skipping today's post: {}", e),
        }
    }
}
