// Account sign-up: the HTML form page, the /api/signup handler, and user storage.

pub mod handlers;
pub mod password;
pub mod repository;
pub mod validation;
