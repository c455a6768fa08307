// Response generation: prompt building, tone, and the /api/generate handler.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tone;
