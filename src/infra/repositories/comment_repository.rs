//! Comment repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use super::entities::comment::{self, ActiveModel, Entity as CommentEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{Comment, CommentWithAuthor};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Comment repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a comment by `user_id` on `item_id`
    async fn create(&self, item_id: Uuid, user_id: Uuid, body: String) -> AppResult<Comment>;

    /// Comments on an item with author names, oldest first
    async fn list_for_item(&self, item_id: Uuid) -> AppResult<Vec<CommentWithAuthor>>;
}

/// Concrete implementation of CommentRepository
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn create(&self, item_id: Uuid, user_id: Uuid, body: String) -> AppResult<Comment> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(item_id),
            user_id: Set(user_id),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Comment::from(model))
    }

    async fn list_for_item(&self, item_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        let rows = CommentEntity::find()
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_asc(comment::Column::CreatedAt)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentWithAuthor {
                comment: Comment::from(comment),
                author_name: author.map(|u| u.name).unwrap_or_default(),
            })
            .collect())
    }
}
