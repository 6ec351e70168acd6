//! Item repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::item::{self, ActiveModel, Entity as ItemEntity, Model};
use crate::config::RECENT_ITEMS_LIMIT;
use crate::domain::{price_to_cents, Item, ItemAttributes, ItemScope};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(test)]
use mockall::automock;

/// Item repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find item by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>>;

    /// Find item by ID among one user's items
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Item>>;

    /// Items in a scope, newest first
    async fn list(&self, scope: ItemScope) -> AppResult<Vec<Item>>;

    /// Items listed by one user, newest first
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Item>>;

    /// Create a new item owned by `user_id`
    async fn create(&self, user_id: Uuid, attrs: ItemAttributes) -> AppResult<Item>;

    /// Overwrite the editable attributes
    async fn update(&self, id: Uuid, attrs: ItemAttributes) -> AppResult<Item>;

    /// Record the sale date
    async fn mark_sold(&self, id: Uuid, sold_on: NaiveDate) -> AppResult<Item>;

    /// Delete item by ID; its comments go with it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ItemRepository
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<Model> {
        ItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()
    }
}

fn scoped(scope: ItemScope) -> Select<ItemEntity> {
    let newest_first = ItemEntity::find().order_by_desc(item::Column::CreatedAt);
    match scope {
        ItemScope::All => newest_first,
        ItemScope::ForSale => newest_first.filter(item::Column::SoldOn.is_null()),
        ItemScope::Sold => newest_first.filter(item::Column::SoldOn.is_not_null()),
        ItemScope::Recent => newest_first.limit(RECENT_ITEMS_LIMIT),
        ItemScope::InCondition(condition) => newest_first
            .filter(item::Column::SoldOn.is_null())
            .filter(item::Column::Condition.eq(condition.as_str())),
    }
}

fn cents(attrs: &ItemAttributes) -> AppResult<i64> {
    price_to_cents(attrs.price).ok_or_else(|| AppError::invalid_field("price", "is too large"))
}

fn into_items(models: Vec<Model>) -> AppResult<Vec<Item>> {
    models.into_iter().map(Item::try_from).collect()
}

#[async_trait]
impl ItemRepository for ItemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        ItemEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Item>> {
        ItemEntity::find_by_id(id)
            .filter(item::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn list(&self, scope: ItemScope) -> AppResult<Vec<Item>> {
        into_items(scoped(scope).all(&self.db).await?)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(item::Column::UserId.eq(user_id))
            .order_by_desc(item::Column::CreatedAt)
            .all(&self.db)
            .await?;

        into_items(models)
    }

    async fn create(&self, user_id: Uuid, attrs: ItemAttributes) -> AppResult<Item> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            price_cents: Set(cents(&attrs)?),
            name: Set(attrs.name),
            description: Set(attrs.description),
            condition: Set(attrs.condition.as_str().to_string()),
            sold_on: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Item::try_from(active_model.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, attrs: ItemAttributes) -> AppResult<Item> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.price_cents = Set(cents(&attrs)?);
        active.name = Set(attrs.name);
        active.description = Set(attrs.description);
        active.condition = Set(attrs.condition.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        Item::try_from(active.update(&self.db).await?)
    }

    async fn mark_sold(&self, id: Uuid, sold_on: NaiveDate) -> AppResult<Item> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.sold_on = Set(Some(sold_on));
        active.updated_at = Set(chrono::Utc::now());

        Item::try_from(active.update(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ItemEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
