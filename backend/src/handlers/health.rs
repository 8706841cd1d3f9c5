//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Loaded artifact summary
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub weather_rows: usize,
    pub classes: usize,
}

/// Reports "degraded" when the reference table is empty, since every lookup
/// then falls back to zeros.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let context = &state.context;

    Json(HealthResponse {
        status: if context.table.is_empty() { "degraded" } else { "healthy" },
        version: env!("CARGO_PKG_VERSION"),
        weather_rows: context.table.len(),
        classes: context.decoder.len(),
    })
}
