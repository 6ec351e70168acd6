//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Outbound mail
//! - Unit of Work for repository access

pub mod db;
pub mod mailer;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use mailer::{EmailMessage, LogMailer, Mailer};
pub use repositories::{
    CommentRepository, CommentStore, ItemRepository, ItemStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use mailer::MockMailer;
#[cfg(test)]
pub use repositories::{MockCommentRepository, MockItemRepository, MockUserRepository};
