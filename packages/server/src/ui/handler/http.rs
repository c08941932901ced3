//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::GameStateDto, ui::state::AppState};

/// Debug endpoint exposing the authoritative game state (for testing purposes)
pub async fn debug_game_state(State(state): State<Arc<AppState>>) -> Json<GameStateDto> {
    let snapshot = state.repository.snapshot().await;

    // Domain Model から DTO への変換
    Json(GameStateDto::from(&snapshot))
}

/// Plain-text liveness probe
pub async fn health() -> &'static str {
    "ok"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
