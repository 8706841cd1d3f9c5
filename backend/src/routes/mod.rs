//! Route definitions for the Crop Recommender

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Selector options and field descriptors
        .route("/form", get(handlers::get_form_options))
        .nest("/weather", weather_routes())
        .route("/recommendations", post(handlers::create_recommendation))
}

/// Weather reference routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/defaults", get(handlers::get_weather_defaults))
        .route("/table", get(handlers::get_weather_table))
}
