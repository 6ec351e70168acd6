//! Mock-backed Unit of Work and sample entities for service tests.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{price_from_cents, Comment, Condition, Item, User};
use crate::infra::{
    CommentRepository, ItemRepository, MockCommentRepository, MockItemRepository,
    MockUserRepository, UnitOfWork, UserRepository,
};

/// UnitOfWork handing out mock repositories
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    items: Arc<MockItemRepository>,
    comments: Arc<MockCommentRepository>,
}

impl TestUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        items: MockItemRepository,
        comments: MockCommentRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            items: Arc::new(items),
            comments: Arc::new(comments),
        }
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self::new(users, MockItemRepository::new(), MockCommentRepository::new())
    }

    pub fn with_items(items: MockItemRepository) -> Self {
        Self::new(MockUserRepository::new(), items, MockCommentRepository::new())
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn items(&self) -> Arc<dyn ItemRepository> {
        self.items.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comments.clone()
    }
}

pub fn sample_user(name: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_item(user_id: Uuid) -> Item {
    let now = Utc::now();
    Item {
        id: Uuid::new_v4(),
        user_id,
        name: "Ride Timeless Snowboard".to_string(),
        description: "Lorem ipsum dolor sit amet, consectetur adipisicing elit.".to_string(),
        price: price_from_cents(15000),
        condition: Condition::Good,
        sold_on: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_comment(item_id: Uuid, user_id: Uuid, body: &str) -> Comment {
    let now = Utc::now();
    Comment {
        id: Uuid::new_v4(),
        item_id,
        user_id,
        body: body.to_string(),
        created_at: now,
        updated_at: now,
    }
}
