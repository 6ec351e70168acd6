//! HTTP request handlers.

pub mod comment_handler;
pub mod health_handler;
pub mod item_handler;
pub mod session_handler;
pub mod user_handler;

pub use comment_handler::comment_routes;
pub use health_handler::health;
pub use item_handler::{item_routes, list_items};
pub use session_handler::session_routes;
pub use user_handler::{new_user, user_routes};
