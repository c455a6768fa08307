use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::signup::{SignUpResponse, UserSignUp};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Talks to a Quill server's sign-up endpoint.
#[derive(Clone)]
pub struct SignUpClient {
    client: Client,
    base_url: String,
}

impl SignUpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn signup_url(&self) -> String {
        format!("{}/api/signup", self.base_url.trim_end_matches('/'))
    }

    /// POSTs `payload` as JSON and reads the reply, whatever the HTTP status.
    ///
    /// Only a body that is not JSON at all is an error. JSON that does not
    /// fit `SignUpResponse` reads as a failure with no message.
    pub async fn sign_up(&self, payload: &UserSignUp) -> Result<SignUpResponse, ClientError> {
        let response = self.client.post(self.signup_url()).json(payload).send().await?;
        let status = response.status();
        let body: Value = serde_json::from_str(&response.text().await?)?;
        debug!(%status, "Sign-up endpoint replied");

        Ok(serde_json::from_value(body).unwrap_or_else(|e| {
            debug!("Unrecognised sign-up reply: {e}");
            SignUpResponse {
                success: false,
                user_id: None,
                message: None,
            }
        }))
    }
}
