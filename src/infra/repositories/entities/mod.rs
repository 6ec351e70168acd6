//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod comment;
pub mod item;
pub mod user;
