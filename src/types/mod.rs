//! Shared response types.

mod response;

pub use response::{Created, Flash, FlashBody, Redirect};
