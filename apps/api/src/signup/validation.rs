//! Server-side checks on a sign-up payload.

use validator::{Validate, ValidationErrors};

use crate::errors::AppError;
use crate::models::signup::UserSignUp;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

/// A sign-up payload with its email already normalized.
#[derive(Debug, Validate)]
pub struct NewAccount {
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Please enter a valid email address.")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}

impl From<UserSignUp> for NewAccount {
    fn from(payload: UserSignUp) -> Self {
        Self {
            email: normalize_email(&payload.email),
            password: payload.password,
            confirm_password: payload.confirm_password,
        }
    }
}

/// Normalizes and validates `payload`.
pub fn validate_sign_up(payload: UserSignUp) -> Result<NewAccount, AppError> {
    let account = NewAccount::from(payload);
    account.validate().map_err(first_message)?;
    Ok(account)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Picks one message to show, checking fields in form order.
fn first_message(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let message = ["email", "password", "confirm_password"]
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .filter_map(|errs| errs.first())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| format!("Validation error: {errors}"));
    AppError::Validation(message)
}
