//! HTTP handlers for weather lookup endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::services::weather::{SelectionInput, WeatherDefaultsResponse};
use crate::services::WeatherService;
use crate::AppState;
use shared::WeatherReferenceRow;

/// Get the pre-filled temperature, humidity and rainfall for a month and region
pub async fn get_weather_defaults(
    State(state): State<AppState>,
    Query(query): Query<SelectionInput>,
) -> AppResult<Json<WeatherDefaultsResponse>> {
    let service = WeatherService::new(state.context.table.clone());
    let defaults = service.defaults(&query)?;
    Ok(Json(defaults))
}

/// Get the full reference table, for clients that look up defaults locally
pub async fn get_weather_table(State(state): State<AppState>) -> Json<Vec<WeatherReferenceRow>> {
    let service = WeatherService::new(state.context.table.clone());
    Json(service.rows().to_vec())
}
