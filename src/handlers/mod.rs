pub mod chat;
pub mod emergency;
pub mod health;
pub mod rate_limit;
pub mod report;
pub mod symptom;
pub mod tracking;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::errors::AppError;
use crate::state::AppState;

/// Multipart framing on top of the 10 MB file cap.
const MAX_UPLOAD_BODY: usize = 11 * 1024 * 1024;
const MAX_JSON_BODY: usize = 10 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/chat", post(chat::chat))
        .route("/chat/agent", post(chat::chat_with_agent))
        .route("/chat/stream", post(chat::chat_stream))
        .route("/analyze-symptom", post(symptom::analyze_symptom))
        .route(
            "/report/analyze",
            post(report::analyze_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route(
            "/analyzeReport",
            post(report::analyze_text).layer(DefaultBodyLimit::max(MAX_JSON_BODY)),
        )
        .route("/emergency/trigger", post(emergency::trigger))
        .route("/emergency/health", get(emergency::health))
        .route("/water", post(tracking::update_water))
        .route("/water/week", get(tracking::water_week))
        .route("/water/reset", post(tracking::reset_water))
        .route("/sleep", post(tracking::update_sleep))
        .route("/sleep/week", get(tracking::sleep_week))
        .route("/sleep/reset", post(tracking::reset_sleep))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
