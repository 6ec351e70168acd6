//! Item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{price_from_cents, Condition, Item};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Price in whole cents
    pub price_cents: i64,
    pub condition: String,
    pub sold_on: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Fails only when the stored condition is not a known one.
impl TryFrom<Model> for Item {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let condition: Condition = model
            .condition
            .parse()
            .map_err(|e| AppError::internal(format!("Item {}: {}", model.id, e)))?;

        Ok(Item {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            price: price_from_cents(model.price_cents),
            condition,
            sold_on: model.sold_on,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
