use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::ChatPipeline;

use super::models::{ChatRequest, ChatResponse, ErrorResponse};

pub const MISSING_MESSAGE: &str = "Message not provided in the request.";

pub async fn chat_handler(
    State(pipeline): State<Arc<ChatPipeline>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    let message = match request.message {
        Some(message) if !message.trim().is_empty() => message,
        _ => {
            log::warn!("received empty message payload");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: MISSING_MESSAGE.to_string(),
                }),
            ));
        }
    };

    let response = pipeline.answer(&message).await;

    log::info!("answered chat message in {}ms", start.elapsed().as_millis());
    Ok(Json(ChatResponse { response }))
}
