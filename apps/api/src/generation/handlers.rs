//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_response, GenerateRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub response: String,
}

/// POST /api/generate
///
/// Forwards `content` and `options` to the LLM and relays the generated text.
/// A body that fails to parse is reported like any other failure: HTTP 500
/// with `success: false`.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Generation(e.body_text()))?;

    let response = generate_response(&state.llm, &request).await?;

    Ok(Json(GenerateResponse {
        success: true,
        response,
    }))
}
