//! Comment domain entity: a short note left on an item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{check, not_blank, FieldErrors};

/// Comment domain entity
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment paired with its author's display name
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_name: String,
}

/// Comment form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "is too long (maximum is 200 characters)")
    )]
    #[schema(example = "Is this still available?", max_length = 200)]
    pub body: String,
}

impl CommentForm {
    pub fn validate_fields(&self) -> Result<(), FieldErrors> {
        check(self)
    }
}

/// Comment response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Larry")]
    pub author: String,
    #[schema(example = "Is this still available?")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(entry: CommentWithAuthor) -> Self {
        let CommentWithAuthor { comment, author_name } = entry;
        Self {
            id: comment.id,
            item_id: comment.item_id,
            user_id: comment.user_id,
            author: author_name,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}
