//! Item domain entity: a listing owned by one user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::prelude::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation::{check, not_blank, rule_error, FieldErrors};

/// Item quality tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Bargain")]
    Bargain,
}

impl Condition {
    /// Every accepted condition, in display order
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Excellent,
        Condition::Good,
        Condition::Bargain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Bargain => "Bargain",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string names no known condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCondition(pub String);

impl fmt::Display for UnknownCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown condition '{}'", self.0)
    }
}

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

/// Item domain entity
#[derive(Debug, Clone)]
pub struct Item {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub condition: Condition,
    /// Presence is the only "sold" marker
    pub sold_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn is_sold(&self) -> bool {
        self.sold_on.is_some()
    }

    pub fn is_for_sale(&self) -> bool {
        !self.is_sold()
    }
}

/// Listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemScope {
    /// Every item, unfiltered
    All,
    /// `sold_on` absent
    ForSale,
    /// `sold_on` present
    Sold,
    /// Newest first, capped at five
    Recent,
    /// For-sale items in one condition
    InCondition(Condition),
}

/// Submitted item attributes, kept verbatim so a rejected form can be
/// shown again exactly as entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Bamboo Flyrod")]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 25, message = "is too short (minimum is 25 characters)"))]
    #[schema(example = "Hand split cane, two tips, original tube. Casts beautifully.")]
    pub description: String,
    /// Decimal amount; accepts a JSON string or number
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(custom(function = "valid_price"))]
    #[schema(example = "299.00")]
    pub price: String,
    #[serde(default)]
    #[validate(custom(function = "known_condition"))]
    #[schema(example = "Excellent")]
    pub condition: String,
}

impl ItemForm {
    /// Prefill from a stored item (edit form)
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            condition: item.condition.to_string(),
        }
    }

    /// Apply every item rule and return the typed attributes.
    pub fn validate_fields(&self) -> Result<ItemAttributes, FieldErrors> {
        check(self)?;

        let price = parse_price(&self.price).map_err(|m| FieldErrors::single("price", m))?;
        let condition = Condition::from_str(&self.condition)
            .map_err(|_| FieldErrors::single("condition", NOT_IN_LIST))?;

        Ok(ItemAttributes {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price,
            condition,
        })
    }
}

/// Validated item attributes ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAttributes {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub condition: Condition,
}

const NOT_A_NUMBER: &str = "is not a number";
const NEGATIVE: &str = "must be greater than or equal to 0";
const TOO_LARGE: &str = "is too large";
const NOT_IN_LIST: &str = "is not included in the list";

/// Parse a submitted price, rounded to cents.
pub fn parse_price(raw: &str) -> Result<Decimal, &'static str> {
    let price = Decimal::from_str(raw.trim()).map_err(|_| NOT_A_NUMBER)?;
    if price < Decimal::ZERO {
        return Err(NEGATIVE);
    }
    let mut price = price.round_dp(2);
    price.rescale(2);
    price_to_cents(price).ok_or(TOO_LARGE)?;
    Ok(price)
}

/// Whole cents, `None` when out of storage range
pub fn price_to_cents(price: Decimal) -> Option<i64> {
    let mut scaled = price.round_dp(2);
    scaled.rescale(2);
    i64::try_from(scaled.mantissa()).ok()
}

pub fn price_from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn valid_price(price: &str) -> Result<(), ValidationError> {
    parse_price(price)
        .map(|_| ())
        .map_err(|message| rule_error("price", message))
}

fn known_condition(condition: &str) -> Result<(), ValidationError> {
    Condition::from_str(condition)
        .map(|_| ())
        .map_err(|_| rule_error("inclusion", NOT_IN_LIST))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    // null is left for the price rule to reject
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Item response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Owner's user id
    pub user_id: Uuid,
    #[schema(example = "Bamboo Flyrod")]
    pub name: String,
    pub description: String,
    /// Decimal rendered with two fractional digits
    #[schema(example = "299.00")]
    pub price: String,
    pub condition: Condition,
    pub sold_on: Option<NaiveDate>,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            sold: item.is_sold(),
            price: item.price.to_string(),
            id: item.id,
            user_id: item.user_id,
            name: item.name,
            description: item.description,
            condition: item.condition,
            sold_on: item.sold_on,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
