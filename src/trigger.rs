use crate::service::PostService;
use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Serialize)]
pub struct TriggerResponse {
    pub message: String,
    pub status: String,
}

pub fn router(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/post", post(handle_post))
        .with_state(service)
}

/// Runs the daily post immediately, same flow as the timer.
async fn handle_post(State(service): State<Arc<PostService>>) -> Json<TriggerResponse> {
    match service.daily_post().await {
        Ok(post) => {
            info!("Manual trigger posted {} about {}", post.mode, post.topic);
            Json(TriggerResponse {
                message: post.content,
                status: "Success".to_string(),
            })
        }
        Err(e) => {
            error!("Manual trigger failed: {}", e);
            Json(TriggerResponse {
                message: String::new(),
                status: format!("Error: {}", e),
            })
        }
    }
}

pub async fn serve(service: Arc<PostService>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Trigger endpoint listening on {}", addr);
    axum::serve(listener, router(service)).await
}
