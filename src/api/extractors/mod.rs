//! Custom extractors.

mod current_user;
mod json_body;

pub use current_user::CurrentUser;
pub use json_body::{JsonBody, OptionalJsonBody};
