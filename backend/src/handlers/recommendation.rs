//! HTTP handlers for the recommendation form

use axum::{extract::State, response::Html, Json};

use crate::error::{AppJson, AppResult};
use crate::services::recommendation::FormOptions;
use crate::services::RecommendationService;
use crate::AppState;
use shared::{InputRecord, PredictionResult};

fn service(state: &AppState) -> RecommendationService {
    RecommendationService::new(
        state.context.clone(),
        state.config.validation.zero_policy(),
    )
}

/// Get selector options and field descriptors for rendering the form
pub async fn get_form_options(State(state): State<AppState>) -> Json<FormOptions> {
    Json(service(&state).form_options())
}

/// Validate a submitted form and return the recommended crop
pub async fn create_recommendation(
    State(state): State<AppState>,
    AppJson(input): AppJson<InputRecord>,
) -> AppResult<Json<PredictionResult>> {
    let result = service(&state).recommend(&input)?;
    Ok(Json(result))
}

/// Serve the browser form
pub async fn form_page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
