//! Notification service - Emails the owner when their item gets a comment.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Comment, Item, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmailMessage, Mailer, UnitOfWork};

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Tell the item's owner about a new comment
    async fn new_comment(&self, comment: &Comment, item: &Item, author: &User) -> AppResult<()>;
}

/// Build the "new comment" email for an item owner.
pub fn new_comment_email(
    from: &str,
    owner: &User,
    item: &Item,
    comment: &Comment,
    author: &User,
) -> EmailMessage {
    let body = format!(
        "Hi {},\n\n{} commented on your item \"{}\":\n\n{}\n",
        owner.name, author.name, item.name, comment.body
    );
    EmailMessage::new(from, &owner.email, format!("New Comment for {}", item.name), body)
}

/// Concrete implementation of NotificationService.
pub struct CommentNotifier<U: UnitOfWork> {
    uow: Arc<U>,
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl<U: UnitOfWork> CommentNotifier<U> {
    pub fn new(uow: Arc<U>, mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            uow,
            mailer,
            from: from.into(),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for CommentNotifier<U> {
    async fn new_comment(&self, comment: &Comment, item: &Item, author: &User) -> AppResult<()> {
        let owner = self
            .uow
            .users()
            .find_by_id(item.user_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Item {} has no owner", item.id)))?;

        let message = new_comment_email(&self.from, &owner, item, comment, author);
        self.mailer.deliver(message).await
    }
}
