use axum::{extract::State, http::StatusCode, Json};

use crate::dtos::HealthResponse;
use crate::services::providers::groq::PROVIDER_NAME;
use crate::startup::AppState;

/// Liveness descriptor. Reports the configured backend without calling it.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            provider: PROVIDER_NAME.to_string(),
            model: state.config.groq.model.clone(),
        }),
    )
}
