//! Item service - Listings and their owner-only lifecycle.
//!
//! Mutations look the item up among the actor's own items; a miss
//! (absent or someone else's) is [`AppError::NotOwner`] and nothing is
//! touched.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CommentWithAuthor, Item, ItemForm, ItemScope, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// An item with everything its detail page shows
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: Item,
    pub owner: User,
    pub comments: Vec<CommentWithAuthor>,
}

/// Item service trait for dependency injection.
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Items in a scope
    async fn list_items(&self, scope: ItemScope) -> AppResult<Vec<Item>>;

    /// Items listed by one user
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Item>>;

    /// Get item by ID
    async fn get_item(&self, id: Uuid) -> AppResult<Item>;

    /// Item with its owner and comments
    async fn show_item(&self, id: Uuid) -> AppResult<ItemDetail>;

    /// Create an item owned by the actor
    async fn create_item(&self, actor: &User, form: &ItemForm) -> AppResult<Item>;

    /// The item `id` among the actor's own items
    async fn find_owned(&self, actor: &User, id: Uuid) -> AppResult<Item>;

    /// Update one of the actor's items
    async fn update_item(&self, actor: &User, id: Uuid, form: &ItemForm) -> AppResult<Item>;

    /// Delete one of the actor's items along with its comments
    async fn destroy_item(&self, actor: &User, id: Uuid) -> AppResult<()>;

    /// Mark one of the actor's items sold, today unless a date is given
    async fn mark_sold(&self, actor: &User, id: Uuid, sold_on: Option<NaiveDate>) -> AppResult<Item>;
}

/// Concrete implementation of ItemService using Unit of Work.
pub struct ItemManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ItemManager<U> {
    /// Create new item service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ItemService for ItemManager<U> {
    async fn list_items(&self, scope: ItemScope) -> AppResult<Vec<Item>> {
        self.uow.items().list(scope).await
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        self.uow.items().list_by_owner(user_id).await
    }

    async fn get_item(&self, id: Uuid) -> AppResult<Item> {
        self.uow
            .items()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn show_item(&self, id: Uuid) -> AppResult<ItemDetail> {
        let item = self.get_item(id).await?;
        let owner = self
            .uow
            .users()
            .find_by_id(item.user_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Item {} has no owner", item.id)))?;
        let comments = self.uow.comments().list_for_item(item.id).await?;

        Ok(ItemDetail {
            item,
            owner,
            comments,
        })
    }

    async fn create_item(&self, actor: &User, form: &ItemForm) -> AppResult<Item> {
        let attrs = form.validate_fields().map_err(AppError::Validation)?;
        let item = self.uow.items().create(actor.id, attrs).await?;

        tracing::info!(item_id = %item.id, user_id = %actor.id, "Item created");
        Ok(item)
    }

    async fn find_owned(&self, actor: &User, id: Uuid) -> AppResult<Item> {
        self.uow
            .items()
            .find_owned(id, actor.id)
            .await?
            .ok_or_not_owner()
    }

    async fn update_item(&self, actor: &User, id: Uuid, form: &ItemForm) -> AppResult<Item> {
        let item = self.find_owned(actor, id).await?;
        let attrs = form.validate_fields().map_err(AppError::Validation)?;

        self.uow.items().update(item.id, attrs).await
    }

    async fn destroy_item(&self, actor: &User, id: Uuid) -> AppResult<()> {
        let item = self.find_owned(actor, id).await?;
        self.uow.items().delete(item.id).await?;

        tracing::info!(item_id = %item.id, "Item deleted");
        Ok(())
    }

    async fn mark_sold(&self, actor: &User, id: Uuid, sold_on: Option<NaiveDate>) -> AppResult<Item> {
        let item = self.find_owned(actor, id).await?;
        let sold_on = sold_on.unwrap_or_else(|| Utc::now().date_naive());

        self.uow.items().mark_sold(item.id, sold_on).await
    }
}
