use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::pipeline::ChatPipeline;

pub mod handlers;
pub mod models;

pub fn create_router(pipeline: Arc<ChatPipeline>) -> Router {
    // The chat UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handlers::chat_handler))
        .with_state(pipeline)
        .layer(cors)
}
