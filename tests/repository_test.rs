//! Persistence tests against an in-memory SQLite database.

mod common;

use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::prelude::Decimal;
use uuid::Uuid;

use classifieds::domain::{Condition, ItemAttributes, ItemScope, NewUser, UserForm};
use classifieds::errors::AppError;
use classifieds::infra::UnitOfWork;
use classifieds::services::{UserManager, UserService};

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "hashed".to_string(),
    }
}

fn attrs(name: &str, condition: Condition) -> ItemAttributes {
    ItemAttributes {
        name: name.to_string(),
        description: "Lorem ipsum dolor sit amet, consectetur adipisicing elit.".to_string(),
        price: Decimal::from_str("49.99").unwrap(),
        condition,
    }
}

#[tokio::test]
async fn test_deleting_user_removes_their_items_and_comments() {
    let (_db, uow) = common::persistence().await;
    let shemp = uow.users().create(new_user("Shemp")).await.unwrap();
    let larry = uow.users().create(new_user("Larry")).await.unwrap();

    let tv = uow.items().create(shemp.id, attrs("Flatscreen LCD TV", Condition::New)).await.unwrap();
    let lens = uow.items().create(larry.id, attrs("Canon 5D", Condition::LikeNew)).await.unwrap();
    uow.comments().create(tv.id, larry.id, "Still available?".into()).await.unwrap();
    uow.comments().create(lens.id, shemp.id, "Any scratches?".into()).await.unwrap();

    uow.users().delete(shemp.id).await.unwrap();

    assert!(uow.items().find_by_id(tv.id).await.unwrap().is_none());
    assert!(uow.comments().list_for_item(tv.id).await.unwrap().is_empty());
    // Shemp's comment on Larry's lens goes too
    assert!(uow.comments().list_for_item(lens.id).await.unwrap().is_empty());
    assert!(uow.items().find_by_id(lens.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_item_removes_its_comments() {
    let (_db, uow) = common::persistence().await;
    let moe = uow.users().create(new_user("Moe")).await.unwrap();
    let curly = uow.users().create(new_user("Curly")).await.unwrap();
    let rod = uow.items().create(moe.id, attrs("Bamboo Flyrod", Condition::Excellent)).await.unwrap();
    uow.comments().create(rod.id, curly.id, "Does it come with a case?".into()).await.unwrap();

    uow.items().delete(rod.id).await.unwrap();

    assert!(uow.comments().list_for_item(rod.id).await.unwrap().is_empty());
    assert!(uow.users().find_by_id(curly.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (_db, uow) = common::persistence().await;

    assert!(matches!(uow.items().delete(Uuid::new_v4()).await, Err(AppError::NotFound)));
    assert!(matches!(uow.users().delete(Uuid::new_v4()).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_email_unique_ignoring_case() {
    let (_db, uow) = common::persistence().await;
    let users = UserManager::new(uow.clone());
    let form = |email: &str| UserForm {
        name: "Larry".to_string(),
        email: email.to_string(),
        password: Some("secret".to_string()),
        password_confirmation: None,
    };

    users.register(&form("A@B.com")).await.unwrap();
    let result = users.register(&form("a@b.com")).await;

    match result {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.on("email"), vec!["has already been taken"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unique_index_backs_email_check() {
    let (_db, uow) = common::persistence().await;
    uow.users().create(new_user("Larry")).await.unwrap();

    let result = uow.users().create(new_user("Larry")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_for_sale_and_sold_partition_all_items() {
    let (_db, uow) = common::persistence().await;
    let owner = uow.users().create(new_user("Curly")).await.unwrap();

    let board = uow.items().create(owner.id, attrs("Snowboard", Condition::Bargain)).await.unwrap();
    uow.items().create(owner.id, attrs("Unicycle", Condition::Good)).await.unwrap();
    uow.items().create(owner.id, attrs("Flyrod", Condition::Good)).await.unwrap();
    let sold_on = NaiveDate::from_ymd_opt(2014, 1, 2).unwrap();
    let sold = uow.items().mark_sold(board.id, sold_on).await.unwrap();
    assert!(sold.is_sold());
    assert_eq!(sold.sold_on, Some(sold_on));

    let all = uow.items().list(ItemScope::All).await.unwrap();
    let for_sale = uow.items().list(ItemScope::ForSale).await.unwrap();
    let sold = uow.items().list(ItemScope::Sold).await.unwrap();

    assert_eq!(for_sale.len() + sold.len(), all.len());
    assert!(for_sale.iter().all(|i| !i.is_sold()));
    assert!(sold.iter().all(|i| i.is_sold()));
    assert!(for_sale.iter().all(|i| sold.iter().all(|s| s.id != i.id)));
}

#[tokio::test]
async fn test_in_condition_only_for_sale() {
    let (_db, uow) = common::persistence().await;
    let owner = uow.users().create(new_user("Larry")).await.unwrap();
    let good_sold = uow.items().create(owner.id, attrs("Old bike", Condition::Good)).await.unwrap();
    uow.items().create(owner.id, attrs("Unicycle", Condition::Good)).await.unwrap();
    uow.items().create(owner.id, attrs("TV", Condition::New)).await.unwrap();
    uow.items()
        .mark_sold(good_sold.id, NaiveDate::from_ymd_opt(2014, 1, 2).unwrap())
        .await
        .unwrap();

    let good = uow.items().list(ItemScope::InCondition(Condition::Good)).await.unwrap();

    assert_eq!(good.len(), 1);
    assert_eq!(good[0].name, "Unicycle");
}

#[tokio::test]
async fn test_recent_returns_five_newest_first() {
    let (_db, uow) = common::persistence().await;
    let owner = uow.users().create(new_user("Moe")).await.unwrap();
    for n in 0..7 {
        uow.items()
            .create(owner.id, attrs(&format!("Item {}", n), Condition::Good))
            .await
            .unwrap();
    }

    let recent = uow.items().list(ItemScope::Recent).await.unwrap();

    assert_eq!(recent.len(), 5);
    assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(recent[0].name, "Item 6");
}

#[tokio::test]
async fn test_recent_with_fewer_items() {
    let (_db, uow) = common::persistence().await;
    let owner = uow.users().create(new_user("Moe")).await.unwrap();
    uow.items().create(owner.id, attrs("Only", Condition::New)).await.unwrap();

    assert_eq!(uow.items().list(ItemScope::Recent).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_price_round_trips_through_cents() {
    let (_db, uow) = common::persistence().await;
    let owner = uow.users().create(new_user("Shemp")).await.unwrap();
    let created = uow.items().create(owner.id, attrs("TV", Condition::LikeNew)).await.unwrap();

    let found = uow.items().find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found.price.to_string(), "49.99");
    assert_eq!(found.condition, Condition::LikeNew);
}

#[tokio::test]
async fn test_find_owned_scopes_to_owner() {
    let (_db, uow) = common::persistence().await;
    let larry = uow.users().create(new_user("Larry")).await.unwrap();
    let moe = uow.users().create(new_user("Moe")).await.unwrap();
    let lens = uow.items().create(larry.id, attrs("Canon 5D", Condition::LikeNew)).await.unwrap();

    assert!(uow.items().find_owned(lens.id, larry.id).await.unwrap().is_some());
    assert!(uow.items().find_owned(lens.id, moe.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_comments_listed_oldest_first_with_authors() {
    let (_db, uow) = common::persistence().await;
    let shemp = uow.users().create(new_user("Shemp")).await.unwrap();
    let larry = uow.users().create(new_user("Larry")).await.unwrap();
    let moe = uow.users().create(new_user("Moe")).await.unwrap();
    let unicycle = uow.items().create(shemp.id, attrs("Unicycle", Condition::Good)).await.unwrap();
    uow.comments().create(unicycle.id, larry.id, "How many wheels does it have?".into()).await.unwrap();
    uow.comments().create(unicycle.id, moe.id, "Is it still available?".into()).await.unwrap();

    let comments = uow.comments().list_for_item(unicycle.id).await.unwrap();

    let authors: Vec<_> = comments.iter().map(|c| c.author_name.as_str()).collect();
    assert_eq!(authors, vec!["Larry", "Moe"]);
}

#[tokio::test]
async fn test_seed_loads_demo_data_once() {
    let (_db, uow) = common::persistence().await;

    classifieds::commands::seed::seed(uow.clone()).await.unwrap();
    classifieds::commands::seed::seed(uow.clone()).await.unwrap();

    let users = uow.users().list().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Curly", "Larry", "Moe", "Shemp"]);
    assert_eq!(uow.items().list(ItemScope::All).await.unwrap().len(), 5);

    let larry = uow.users().find_by_email("larry@example.com").await.unwrap().unwrap();
    assert!(larry.verify_password("secret"));

    let unicycle = uow
        .items()
        .list(ItemScope::All)
        .await
        .unwrap()
        .into_iter()
        .find(|item| item.name == "20\" Tire Unicycle")
        .unwrap();
    assert_eq!(uow.comments().list_for_item(unicycle.id).await.unwrap().len(), 3);
}
