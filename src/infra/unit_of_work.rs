//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on one
//! handle instead of wiring each store separately.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CommentRepository, CommentStore, ItemRepository, ItemStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories. Tests substitute a
/// struct that hands out mock repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get item repository
    fn items(&self) -> Arc<dyn ItemRepository>;

    /// Get comment repository
    fn comments(&self) -> Arc<dyn CommentRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    item_repo: Arc<ItemStore>,
    comment_repo: Arc<CommentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            item_repo: Arc::new(ItemStore::new(db.clone())),
            comment_repo: Arc::new(CommentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn items(&self) -> Arc<dyn ItemRepository> {
        self.item_repo.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comment_repo.clone()
    }
}
