use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::signup::{SignUpResponse, UserSignUp};
use crate::signup::password::hash_password;
use crate::signup::repository::DUPLICATE_EMAIL_MESSAGE;
use crate::signup::validation::validate_sign_up;
use crate::state::AppState;

const SIGNUP_PAGE: &str = include_str!("../../assets/signup.html");

/// GET /
pub async fn handle_signup_page() -> Html<&'static str> {
    Html(SIGNUP_PAGE)
}

/// POST /api/signup
///
/// Validates the form, stores the account with an Argon2 password hash,
/// and returns the new user's id.
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<UserSignUp>, JsonRejection>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let account = validate_sign_up(request)?;

    // Skip hashing for a known email; create_user still rejects concurrent duplicates.
    if state.users.find_by_email(&account.email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
    }

    let password = account.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let user = state.users.create_user(&account.email, &password_hash).await?;
    info!(user_id = %user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse::created(user.id.to_string())),
    ))
}
