//! Response generation — prompt → forced tool call → generated text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{build_generation_prompt, generate_response_tool};
use crate::generation::tone::Tone;
use crate::llm_client::LlmClient;

/// How the response should be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationOptions {
    pub tone: Tone,
    pub language: String,
}

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub content: String,
    pub options: CustomizationOptions,
}

/// Arguments of the `generate_response` tool call.
#[derive(Debug, Deserialize)]
struct GeneratedContent {
    response: String,
}

/// Asks the model for a response to `request` and returns the generated text.
///
/// Every failure (transport, provider status, missing tool call, malformed
/// arguments) becomes `AppError::Generation`.
pub async fn generate_response(
    llm: &LlmClient,
    request: &GenerateRequest,
) -> Result<String, AppError> {
    let prompt = build_generation_prompt(
        &request.content,
        request.options.tone,
        &request.options.language,
    );

    info!(
        "Generating response: tone={}, language={}, content_chars={}",
        request.options.tone,
        request.options.language,
        request.content.chars().count()
    );

    let generated: GeneratedContent = llm
        .call_tool_json(&prompt, &generate_response_tool())
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    Ok(generated.response)
}
