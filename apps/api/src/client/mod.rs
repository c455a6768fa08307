// Sign-up form client: the HTTP call to /api/signup and the form state around it.

pub mod api;
pub mod form;

pub use api::{ClientError, SignUpClient};
pub use form::{Field, FormView, SignUpForm};
