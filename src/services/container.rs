//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through one [`ServiceContainer`], which
//! depends on service traits rather than their implementations.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CommentManager, CommentNotifier, CommentService, ItemManager,
    ItemService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Mailer, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get item service
    fn items(&self) -> Arc<dyn ItemService>;

    /// Get comment service
    fn comments(&self) -> Arc<dyn CommentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    item_service: Arc<dyn ItemService>,
    comment_service: Arc<dyn CommentService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        item_service: Arc<dyn ItemService>,
        comment_service: Arc<dyn CommentService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            item_service,
            comment_service,
        }
    }

    /// Create service container from database connection, mail transport and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let notifier = Arc::new(CommentNotifier::new(
            uow.clone(),
            mailer,
            config.mail_from.clone(),
        ));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(UserManager::new(uow.clone())),
            Arc::new(ItemManager::new(uow.clone())),
            Arc::new(CommentManager::new(uow, notifier)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn items(&self) -> Arc<dyn ItemService> {
        self.item_service.clone()
    }

    fn comments(&self) -> Arc<dyn CommentService> {
        self.comment_service.clone()
    }
}
