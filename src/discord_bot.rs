use crate::commands::Command;
use crate::error::{Error, Result};
use crate::render::{MessageSink, Rendered};
use crate::service::{PostService, Reply};
use serenity::all::{
    ChannelId, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, EventHandler, Http,
    Message, Ready, Timestamp,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

const EMBED_TITLE_LIMIT: usize = 256;
const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Posts to the configured channel.
pub struct DiscordService {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordService {
    pub fn new(token: &str, channel_id: u64) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            channel_id: ChannelId::new(channel_id),
        }
    }
}

#[async_trait]
impl MessageSink for DiscordService {
    async fn send(&self, message: &Rendered) -> Result<()> {
        let builder = CreateMessage::new().embed(to_embed(message));
        self.channel_id
            .send_message(&self.http, builder)
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }
}

fn clip(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(limit - 1).collect();
    clipped.push('…');
    clipped
}

pub fn to_embed(message: &Rendered) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(clip(&message.title, EMBED_TITLE_LIMIT))
        .description(clip(&message.body, EMBED_DESCRIPTION_LIMIT))
        .colour(message.color);

    if let Some(ts) = message.timestamp {
        match Timestamp::from_unix_timestamp(ts.timestamp()) {
            Ok(ts) => embed = embed.timestamp(ts),
            Err(e) => warn!("Dropping embed timestamp {}: {}", ts, e),
        }
    }
    if let Some(footer) = &message.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    for (name, value) in &message.fields {
        embed = embed.field(name, value, false);
    }
    embed
}

/// Answers `!` commands in whichever channel they are typed.
pub struct Handler {
    service: Arc<PostService>,
}

impl Handler {
    pub fn new(service: Arc<PostService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(command) = Command::parse(&msg.content) else {
            return;
        };

        let typing = command
            .generates()
            .then(|| msg.channel_id.start_typing(&ctx.http));

        let requester = msg.author.display_name().to_string();
        let reply = self.service.handle_command(command, &requester).await;
        drop(typing);

        let sent = match reply {
            Ok(Reply::Embed(rendered)) => msg
                .channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(to_embed(&rendered)))
                .await
                .map(|_| ()),
            Ok(Reply::Text(text)) => msg.channel_id.say(&ctx.http, text).await.map(|_| ()),
            Err(e) => {
                error!("Command from {} failed: {}", requester, e);
                msg.channel_id
                    .say(&ctx.http, "Sorry, I couldn't come up with anything just now. Try again later.")
                    .await
                    .map(|_| ())
            }
        };

        if let Err(e) = sent {
            error!("Could not reply in channel {}: {}", msg.channel_id, e);
        }
    }
}
