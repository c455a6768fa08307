pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod signup;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
