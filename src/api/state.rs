//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Mailer};
use crate::services::{
    AuthService, CommentService, ItemService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Sessions
    pub auth_service: Arc<dyn AuthService>,
    /// Accounts
    pub user_service: Arc<dyn UserService>,
    /// Listings
    pub item_service: Arc<dyn ItemService>,
    /// Comments and their notifications
    pub comment_service: Arc<dyn CommentService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection, mail transport and config.
    pub fn from_config(database: Arc<Database>, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), mailer, config);
        Self::from_container(&container, database)
    }

    /// Create application state from an existing service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            item_service: container.items(),
            comment_service: container.comments(),
            database,
        }
    }
}
