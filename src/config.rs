use crate::error::{Error, Result};
use chrono::NaiveTime;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CONTENT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_SUMMARY_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_HISTORY_FILE: &str = "fact_history.json";
pub const DEFAULT_POST_TIME: &str = "19:00";

pub struct Config {
    pub discord_token: String,
    pub channel_id: u64,
    pub anthropic_api_key: String,
    pub content_model: String,
    pub summary_model: String,
    pub history_file: PathBuf,
    pub post_time: NaiveTime,
    pub activity_log: Option<PathBuf>,
    pub trigger_addr: Option<SocketAddr>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            get(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} must be set")))
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let channel_id = required("FACT_CHANNEL_ID")?
            .parse()
            .map_err(|_| Error::Config("FACT_CHANNEL_ID must be a u64".to_string()))?;
        let anthropic_api_key = required("ANTHROPIC_API_KEY")?;

        let content_model =
            get("CONTENT_MODEL").unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_string());
        let summary_model =
            get("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());
        let history_file = get("HISTORY_FILE")
            .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string())
            .into();

        let post_time_raw = get("POST_TIME").unwrap_or_else(|| DEFAULT_POST_TIME.to_string());
        let post_time = NaiveTime::parse_from_str(&post_time_raw, "%H:%M")
            .map_err(|_| Error::Config(format!("POST_TIME must be HH:MM, got {post_time_raw}")))?;

        let activity_log = get("ACTIVITY_LOG").filter(|v| !v.is_empty()).map(PathBuf::from);
        let trigger_addr = match get("TRIGGER_ADDR").filter(|v| !v.is_empty()) {
            Some(addr) => Some(
                addr.parse()
                    .map_err(|_| Error::Config(format!("TRIGGER_ADDR is not an address: {addr}")))?,
            ),
            None => None,
        };

        Ok(Self {
            discord_token,
            channel_id,
            anthropic_api_key,
            content_model,
            summary_model,
            history_file,
            post_time,
            activity_log,
            trigger_addr,
        })
    }
}
