//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod comment_repository;
pub(crate) mod entities;
mod item_repository;
mod user_repository;

pub use comment_repository::{CommentRepository, CommentStore};
pub use item_repository::{ItemRepository, ItemStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
