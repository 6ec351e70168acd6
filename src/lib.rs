//! Classifieds - a small marketplace where users list items for sale
//! and comment on each other's listings.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, items, comments and their validation rules
//! - **services**: Use cases (sessions, accounts, listings, comments, notification)
//! - **infra**: Database, migrations, repositories and mail transport
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types (redirects, flash messages)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Load demo data
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Comment, Item, Password, User};
pub use errors::{AppError, AppResult};
