use axum::{extract::State, http::StatusCode, Json};
use std::time::Instant;

use crate::dtos::{AskRequest, AskResponse};
use crate::services::metrics;
use crate::services::providers::groq::PROVIDER_NAME;
use crate::startup::AppState;
use service_core::error::AppError;

/// Relay one travel question to the completion provider.
///
/// Empty and whitespace-only questions are rejected before any outbound
/// call; the question itself is forwarded untrimmed.
#[tracing::instrument(skip(state, request))]
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<(StatusCode, Json<AskResponse>), AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Question cannot be empty"
        )));
    }

    let model = state.config.groq.model.as_str();
    let started = Instant::now();

    match state.provider.complete(&request.question).await {
        Ok(completion) => {
            metrics::record_provider_latency(
                PROVIDER_NAME,
                model,
                started.elapsed().as_secs_f64(),
            );
            metrics::record_completion(model, "success");
            if let (Some(input), Some(output)) =
                (completion.input_tokens, completion.output_tokens)
            {
                metrics::record_tokens(model, input, output);
            }

            tracing::info!(answer_len = completion.text.len(), "Question answered");

            Ok((StatusCode::OK, Json(AskResponse::success(completion.text))))
        }
        Err(e) => {
            metrics::record_completion(model, "error");
            metrics::record_provider_error(PROVIDER_NAME, e.kind());

            tracing::error!(error = %e, "Completion request failed");

            Err(AppError::from(e))
        }
    }
}
