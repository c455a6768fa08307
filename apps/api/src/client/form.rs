//! Sign-up form state: controlled inputs, the in-flight flag, and the
//! message shown after a submission.
//!
//! State changes are published on a `watch` channel so a renderer (or a
//! test) can observe every transition, including the disabled submit
//! control while a request is outstanding.

use tokio::sync::watch;

use crate::client::api::SignUpClient;
use crate::models::signup::{SignUpResponse, UserSignUp};
use crate::signup::validation::PASSWORD_MISMATCH_MESSAGE;

const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during sign-up.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

/// Everything the form renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub data: UserSignUp,
    pub loading: bool,
    pub message: Option<String>,
}

impl FormView {
    pub fn submit_disabled(&self) -> bool {
        self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Signing Up..."
        } else {
            "Sign Up"
        }
    }
}

/// Text displayed for a parsed sign-up reply.
pub fn outcome_message(response: &SignUpResponse) -> String {
    if response.success {
        format!(
            "Sign-up successful! User ID: {}",
            response.user_id.as_deref().unwrap_or_default()
        )
    } else {
        response
            .message
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
    }
}

pub struct SignUpForm {
    client: SignUpClient,
    view: watch::Sender<FormView>,
}

impl SignUpForm {
    pub fn new(client: SignUpClient) -> Self {
        let (view, _) = watch::channel(FormView::default());
        Self { client, view }
    }

    pub fn view(&self) -> FormView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view.subscribe()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.view.send_modify(|view| match field {
            Field::Email => view.data.email = value,
            Field::Password => view.data.password = value,
            Field::ConfirmPassword => view.data.confirm_password = value,
        });
    }

    /// Submits the current field values.
    ///
    /// Ignored while a previous submission is outstanding. Mismatched
    /// passwords are reported without contacting the server.
    pub async fn submit(&self) {
        let mut payload = None;
        self.view.send_if_modified(|view| {
            if view.loading {
                return false;
            }
            if view.data.password != view.data.confirm_password {
                view.message = Some(PASSWORD_MISMATCH_MESSAGE.to_string());
                return true;
            }
            view.loading = true;
            view.message = None;
            payload = Some(view.data.clone());
            true
        });
        let Some(payload) = payload else {
            return;
        };

        let _loading = LoadingGuard(&self.view);

        let message = match self.client.sign_up(&payload).await {
            Ok(response) => outcome_message(&response),
            Err(e) => format!("An error occurred: {e}"),
        };
        self.view.send_modify(|view| view.message = Some(message));
    }
}

/// Clears `loading` when the submission ends, including when the
/// `submit` future is dropped mid-request.
struct LoadingGuard<'a>(&'a watch::Sender<FormView>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|view| view.loading = false);
    }
}
