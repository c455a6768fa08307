use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::signup::repository::UserRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable user store. PostgreSQL when `DATABASE_URL` is set, in-memory otherwise.
    pub users: Arc<dyn UserRepository>,
}
