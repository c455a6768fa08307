pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers::handle_generate;
use crate::signup::handlers::{handle_signup, handle_signup_page};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_signup_page))
        .route("/health", get(health::health_handler))
        .route("/api/signup", post(handle_signup))
        .route("/api/generate", post(handle_generate))
        .with_state(state)
}
