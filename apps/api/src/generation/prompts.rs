// Prompt template and tool schema for response generation.

use serde_json::json;

use crate::generation::tone::Tone;
use crate::llm_client::FunctionTool;

/// Name of the single tool the model is forced to call.
pub const GENERATE_RESPONSE_TOOL: &str = "generate_response";

/// Builds the single user message sent to the model.
///
/// Content and language are embedded verbatim.
pub fn build_generation_prompt(content: &str, tone: Tone, language: &str) -> String {
    format!(
        "Generate an AI response with the following content:\n\n\
         Content: {content}\n\
         Tone: {tone}\n\
         Language: {language}"
    )
}

/// Tool declaration whose arguments carry the generated text as `response`.
pub fn generate_response_tool() -> FunctionTool {
    FunctionTool {
        name: GENERATE_RESPONSE_TOOL,
        description: "Generate an AI-powered response based on the provided content",
        parameters: json!({
            "type": "object",
            "properties": {
                "response": {
                    "type": "string",
                    "description": "The AI-generated response"
                }
            },
            "required": ["response"]
        }),
    }
}
