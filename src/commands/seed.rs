//! Seed command - Loads demo users, items and comments.
//!
//! Records go through the same services as HTTP requests, so the demo
//! data obeys every validation. Comments are written straight to the
//! repository; seeding sends no mail.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{ItemForm, User, UserForm};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{ItemManager, ItemService, UserManager, UserService};

const DEMO_PASSWORD: &str = "secret";

const LOREM_SHORT: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit. Impedit illum minus, suscipit fugit obcaecati, eaque quia esse dignissimos veniam recusandae, asperiores molestiae, rem ex autem quae dolor expedita vel neque?";

const LOREM_LONG: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit. Provident a minus totam perferendis voluptate ut, libero porro. Quasi odit, voluptate, voluptatem quisquam at tempore ratione aliquid, maxime labore consectetur molestias?";

const UNICYCLE: &str = "20\" Tire Unicycle";

/// (name, email)
const USERS: [(&str, &str); 4] = [
    ("Larry", "larry@example.com"),
    ("Moe", "moe@example.com"),
    ("Curly", "curly@example.com"),
    ("Shemp", "shemp@example.com"),
];

/// (owner, name, price, condition)
const ITEMS: [(&str, &str, &str, &str); 5] = [
    ("Shemp", "Flatscreen LCD TV", "159.00", "New"),
    ("Larry", "Canon 5D with 24-105mm Lens", "579.00", "Like New"),
    ("Curly", "Ride Timeless Snowboard", "49.00", "Bargain"),
    ("Moe", "Bamboo Flyrod", "299.00", "Excellent"),
    ("Shemp", UNICYCLE, "99.00", "Good"),
];

/// (author, body) on the unicycle
const COMMENTS: [(&str, &str); 3] = [
    ("Larry", "How many wheels does it have?"),
    ("Moe", "Is it still available?"),
    ("Curly", "Did you lose the other wheel?"),
];

fn description(name: &str) -> String {
    match name {
        "Flatscreen LCD TV" => LOREM_SHORT.to_string(),
        "Bamboo Flyrod" => vec![LOREM_SHORT; 10].join(" "),
        UNICYCLE => "I upgraded to a cycle that has two wheels, so I won't be needing this one anymore. \
                     It has very few miles on it. You can pedal forwards and backwards, and juggle \
                     bowling pins at the same time. It's a lot of fun!"
            .to_string(),
        _ => LOREM_LONG.to_string(),
    }
}

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    seed(uow).await
}

/// Insert the demo data unless users already exist.
pub async fn seed<U: UnitOfWork + 'static>(uow: Arc<U>) -> AppResult<()> {
    if !uow.users().list().await?.is_empty() {
        tracing::warn!("Database already has users; skipping seed");
        return Ok(());
    }

    let users = UserManager::new(uow.clone());
    let items = ItemManager::new(uow.clone());

    let mut by_name: HashMap<&str, User> = HashMap::new();
    for (name, email) in USERS {
        let form = UserForm {
            name: name.to_string(),
            email: email.to_string(),
            password: Some(DEMO_PASSWORD.to_string()),
            password_confirmation: Some(DEMO_PASSWORD.to_string()),
        };
        by_name.insert(name, users.register(&form).await?);
    }

    let owner = |name: &str| {
        by_name
            .get(name)
            .ok_or_else(|| AppError::internal(format!("Unknown seed user {}", name)))
    };

    let mut unicycle = None;
    for (owner_name, name, price, condition) in ITEMS {
        let form = ItemForm {
            name: name.to_string(),
            description: description(name),
            price: price.to_string(),
            condition: condition.to_string(),
        };
        let item = items.create_item(owner(owner_name)?, &form).await?;
        if name == UNICYCLE {
            unicycle = Some(item);
        }
    }

    let unicycle = unicycle.ok_or_else(|| AppError::internal("Unicycle was not seeded"))?;
    for (author, body) in COMMENTS {
        uow.comments()
            .create(unicycle.id, owner(author)?.id, body.to_string())
            .await?;
    }

    tracing::info!(
        users = USERS.len(),
        items = ITEMS.len(),
        comments = COMMENTS.len(),
        "Seed data loaded"
    );
    Ok(())
}
