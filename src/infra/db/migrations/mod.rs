//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20150224_000001_create_users_table;
mod m20150224_000002_create_items_table;
mod m20150224_000003_create_comments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20150224_000001_create_users_table::Migration),
            Box::new(m20150224_000002_create_items_table::Migration),
            Box::new(m20150224_000003_create_comments_table::Migration),
        ]
    }
}
