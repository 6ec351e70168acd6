//! Comment service - Posting comments on items.
//!
//! The item owner is emailed before the call returns. The comment is
//! already committed at that point, so a delivery failure surfaces as
//! [`AppError::Mail`] without undoing it.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::NotificationService;
use crate::domain::{CommentForm, CommentWithAuthor, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Comment service trait for dependency injection.
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Post a comment by the actor on item `item_id` and notify its owner
    async fn create_comment(
        &self,
        actor: &User,
        item_id: Uuid,
        form: &CommentForm,
    ) -> AppResult<CommentWithAuthor>;
}

/// Concrete implementation of CommentService using Unit of Work.
pub struct CommentManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn NotificationService>,
}

impl<U: UnitOfWork> CommentManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn NotificationService>) -> Self {
        Self { uow, notifier }
    }
}

#[async_trait]
impl<U: UnitOfWork> CommentService for CommentManager<U> {
    async fn create_comment(
        &self,
        actor: &User,
        item_id: Uuid,
        form: &CommentForm,
    ) -> AppResult<CommentWithAuthor> {
        let item = self
            .uow
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or_not_found()?;
        form.validate_fields().map_err(AppError::Validation)?;

        let comment = self
            .uow
            .comments()
            .create(item.id, actor.id, form.body.clone())
            .await?;
        tracing::info!(comment_id = %comment.id, item_id = %item.id, "Comment posted");

        if let Err(e) = self.notifier.new_comment(&comment, &item, actor).await {
            tracing::error!(comment_id = %comment.id, error = %e, "Comment notification failed");
            return Err(match e {
                AppError::Mail(_) => e,
                other => AppError::mail(other.to_string()),
            });
        }

        Ok(CommentWithAuthor {
            comment,
            author_name: actor.name.clone(),
        })
    }
}
