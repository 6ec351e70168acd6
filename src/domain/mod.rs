//! Domain layer - Core marketplace entities and rules
//!
//! Users list items and comment on them. Everything here is independent
//! of persistence and HTTP; forms carry the validation rules.

pub mod comment;
pub mod item;
pub mod password;
pub mod user;
pub mod validation;

pub use comment::{Comment, CommentForm, CommentResponse, CommentWithAuthor};
pub use item::{
    price_from_cents, price_to_cents, Condition, Item, ItemAttributes, ItemForm, ItemResponse,
    ItemScope,
};
pub use password::Password;
pub use user::{normalize_email, NewUser, User, UserChanges, UserForm, UserResponse};
pub use validation::{FieldError, FieldErrors};
