//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the Unit of Work.

mod auth_service;
mod comment_service;
pub mod container;
mod item_service;
mod notification_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, SignedIn, TokenResponse};
pub use comment_service::{CommentManager, CommentService};
pub use item_service::{ItemDetail, ItemManager, ItemService};
pub use notification_service::{new_comment_email, CommentNotifier, NotificationService};
pub use user_service::{UserManager, UserService};
