//! HTTP flow tests through the full router over an in-memory database.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{item_json, json as body_json, location, FailingMailer, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_signed_out_create_redirects_to_sign_in() {
    let app = TestApp::new().await;

    let response = app.post("/items", None, item_json("TV", "10", "New")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/session/new");
    assert_eq!(body_json(response).await["alert"], "Please sign in first!");
}

#[tokio::test]
async fn test_sign_in_greets_user() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;

    let response = app
        .post(
            "/session",
            None,
            json!({ "email": "LARRY@example.com", "password": "secret" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["notice"], "Welcome back, Larry!");
    assert_eq!(body["token"]["token_type"], "Bearer");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_in_wrong_password_and_unknown_email_look_alike() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;

    let wrong = app
        .post("/session", None, json!({ "email": "larry@example.com", "password": "nope" }))
        .await;
    let unknown = app
        .post("/session", None, json!({ "email": "nobody@example.com", "password": "secret" }))
        .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;
    assert_eq!(wrong, body_json(unknown).await);
    assert_eq!(wrong["error"]["message"], "Invalid email/password combination!");
}

#[tokio::test]
async fn test_create_item_redirects_with_notice() {
    let app = TestApp::new().await;
    app.sign_up("Shemp", "shemp@example.com").await;
    let token = app.sign_in("shemp@example.com").await;

    let response = app
        .post("/items", Some(&token), item_json("Flatscreen LCD TV", "159", "New"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let path = location(&response);
    assert!(path.starts_with("/items/"));
    assert_eq!(body_json(response).await["notice"], "Item was successfully created!");

    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["item"]["name"], "Flatscreen LCD TV");
    assert_eq!(shown["item"]["price"], "159.00");
    assert_eq!(shown["item"]["sold"], false);
    assert_eq!(shown["owner"]["name"], "Shemp");
}

#[tokio::test]
async fn test_invalid_item_rerenders_form() {
    let app = TestApp::new().await;
    app.sign_up("Shemp", "shemp@example.com").await;
    let token = app.sign_in("shemp@example.com").await;

    let mut item = item_json("TV", "-0.01", "Mint");
    item["description"] = json!("x".repeat(24));
    let response = app.post("/items", Some(&token), item).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["item"]["price"], "-0.01");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"description"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"condition"));

    let items = body_json(app.get("/items", None).await).await;
    assert_eq!(items.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_show_missing_item_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get(&format!("/items/{}", uuid::Uuid::new_v4()), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_cannot_edit_update_or_delete() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;
    app.sign_up("Moe", "moe@example.com").await;
    let larry = app.sign_in("larry@example.com").await;
    let moe = app.sign_in("moe@example.com").await;
    let path = app.create_item(&larry, "Canon 5D").await;

    let edit = app.get(&format!("{}/edit", path), Some(&moe)).await;
    assert_eq!(edit.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&edit), "/");

    let update = app
        .request(Method::PUT, &path, Some(&moe), Some(item_json("Mine now", "1", "Good")))
        .await;
    assert_eq!(update.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&update), "/");

    let delete = app.request(Method::DELETE, &path, Some(&moe), None).await;
    assert_eq!(location(&delete), "/");

    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["item"]["name"], "Canon 5D");
}

#[tokio::test]
async fn test_owner_updates_and_deletes() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;
    let larry = app.sign_in("larry@example.com").await;
    let path = app.create_item(&larry, "Canon 5D").await;

    let edit = body_json(app.get(&format!("{}/edit", path), Some(&larry)).await).await;
    assert_eq!(edit["item"]["name"], "Canon 5D");
    assert_eq!(edit["conditions"].as_array().unwrap().len(), 5);

    let update = app
        .request(
            Method::PATCH,
            &path,
            Some(&larry),
            Some(item_json("Canon 5D Mark II", "549.5", "Like New")),
        )
        .await;
    assert_eq!(update.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&update), path);
    assert_eq!(body_json(update).await["notice"], "Item was successfully updated!");

    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["item"]["price"], "549.50");
    assert_eq!(shown["item"]["condition"], "Like New");

    let delete = app.request(Method::DELETE, &path, Some(&larry), None).await;
    assert_eq!(location(&delete), "/items");
    assert_eq!(body_json(delete).await["alert"], "Item was successfully deleted!");
    assert_eq!(app.get(&path, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_html_redirects_and_emails_owner() {
    let app = TestApp::new().await;
    app.sign_up("Shemp", "shemp@example.com").await;
    app.sign_up("Moe", "moe@example.com").await;
    let shemp = app.sign_in("shemp@example.com").await;
    let moe = app.sign_in("moe@example.com").await;
    let path = app.create_item(&shemp, "20\" Tire Unicycle").await;

    let response = app
        .post(
            &format!("{}/comments", path),
            Some(&moe),
            json!({ "body": "Is it still available?" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), path);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "shemp@example.com");
    assert_eq!(sent[0].subject, "New Comment for 20\" Tire Unicycle");

    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["comments"][0]["author"], "Moe");
    assert_eq!(shown["comments"][0]["body"], "Is it still available?");
}

#[tokio::test]
async fn test_comment_js_returns_fragment() {
    let app = TestApp::new().await;
    app.sign_up("Shemp", "shemp@example.com").await;
    app.sign_up("Curly", "curly@example.com").await;
    let shemp = app.sign_in("shemp@example.com").await;
    let curly = app.sign_in("curly@example.com").await;
    let path = app.create_item(&shemp, "Unicycle").await;

    let response = app
        .post(
            &format!("{}/comments?format=js", path),
            Some(&curly),
            json!({ "body": "Did you lose the other wheel?" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["author"], "Curly");
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_invalid_comment_sends_nothing() {
    let app = TestApp::new().await;
    app.sign_up("Shemp", "shemp@example.com").await;
    let shemp = app.sign_in("shemp@example.com").await;
    let path = app.create_item(&shemp, "Unicycle").await;

    let response = app
        .post(&format!("{}/comments", path), Some(&shemp), json!({ "body": "a".repeat(201) }))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.mailer.sent().is_empty());
    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["comments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_mail_failure_keeps_comment() {
    let app = TestApp::with_mailer(Arc::new(FailingMailer)).await;
    app.sign_up("Shemp", "shemp@example.com").await;
    app.sign_up("Moe", "moe@example.com").await;
    let shemp = app.sign_in("shemp@example.com").await;
    let moe = app.sign_in("moe@example.com").await;
    let path = app.create_item(&shemp, "Unicycle").await;

    let response = app
        .post(&format!("{}/comments", path), Some(&moe), json!({ "body": "Still for sale?" }))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let shown = body_json(app.get(&path, None).await).await;
    assert_eq!(shown["comments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mark_sold_moves_item_between_scopes() {
    let app = TestApp::new().await;
    app.sign_up("Curly", "curly@example.com").await;
    let curly = app.sign_in("curly@example.com").await;
    let board = app.create_item(&curly, "Ride Timeless Snowboard").await;
    app.create_item(&curly, "Unicycle").await;

    let response = app
        .post(&format!("{}/sold", board), Some(&curly), json!({ "sold_on": "2014-01-02" }))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let sold = body_json(app.get("/items?scope=sold", None).await).await;
    let for_sale = body_json(app.get("/items?scope=for_sale", None).await).await;
    assert_eq!(sold.as_array().unwrap().len(), 1);
    assert_eq!(sold[0]["sold_on"], "2014-01-02");
    assert_eq!(for_sale.as_array().unwrap().len(), 1);
    assert_eq!(for_sale[0]["name"], "Unicycle");

    let good = body_json(app.get("/items?condition=Good", None).await).await;
    assert_eq!(good.as_array().unwrap().len(), 1);

    let unknown = app.get("/items?scope=cheap", None).await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_null_price_rerenders_form() {
    let app = TestApp::new().await;
    app.sign_up("Curly", "curly@example.com").await;
    let curly = app.sign_in("curly@example.com").await;

    let mut item = item_json("Ride Timeless Snowboard", "49", "Bargain");
    item["price"] = serde_json::Value::Null;
    let response = app.post("/items", Some(&curly), item).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "price");
    assert_eq!(body["errors"][0]["message"], "is not a number");
}

#[tokio::test]
async fn test_mark_sold_rejects_malformed_date() {
    let app = TestApp::new().await;
    app.sign_up("Curly", "curly@example.com").await;
    let curly = app.sign_in("curly@example.com").await;
    let board = app.create_item(&curly, "Ride Timeless Snowboard").await;

    let response = app
        .post(&format!("{}/sold", board), Some(&curly), json!({ "sold_on": "not-a-date" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let shown = body_json(app.get(&board, None).await).await;
    assert_eq!(shown["item"]["sold"], false);

    // No body at all means today
    let response = app.request(Method::POST, &format!("{}/sold", board), Some(&curly), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let shown = body_json(app.get(&board, None).await).await;
    assert_eq!(shown["item"]["sold"], true);
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;

    let response = app
        .post(
            "/users",
            None,
            json!({ "name": "Other Larry", "email": "Larry@Example.com", "password": "secret" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "email");
    assert_eq!(body["errors"][0]["message"], "has already been taken");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_signup_normalizes_padded_email() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/users",
            None,
            json!({ "name": "Moe", "email": "Moe@Example.com ", "password": "secret" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let profile = body_json(app.get(&location(&response), None).await).await;
    assert_eq!(profile["user"]["email"], "moe@example.com");
    app.sign_in(" MOE@example.com").await;
}

#[tokio::test]
async fn test_account_deletion_cascades_and_is_self_only() {
    let app = TestApp::new().await;
    let shemp_id = app.sign_up("Shemp", "shemp@example.com").await;
    app.sign_up("Larry", "larry@example.com").await;
    let shemp = app.sign_in("shemp@example.com").await;
    let larry = app.sign_in("larry@example.com").await;
    let path = app.create_item(&shemp, "Flatscreen LCD TV").await;

    let forbidden = app
        .request(Method::DELETE, &format!("/users/{}", shemp_id), Some(&larry), None)
        .await;
    assert_eq!(location(&forbidden), "/");

    let deleted = app
        .request(Method::DELETE, &format!("/users/{}", shemp_id), Some(&shemp), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert_eq!(body_json(deleted).await["alert"], "Account successfully deleted!");

    assert_eq!(app.get(&path, None).await.status(), StatusCode::NOT_FOUND);
    // The old token no longer resolves to a user
    let after = app.post("/items", Some(&shemp), item_json("TV", "1", "New")).await;
    assert_eq!(location(&after), "/session/new");
}

#[tokio::test]
async fn test_profile_lists_users_items() {
    let app = TestApp::new().await;
    let id = app.sign_up("Moe", "moe@example.com").await;
    let moe = app.sign_in("moe@example.com").await;
    app.create_item(&moe, "Bamboo Flyrod").await;

    let profile = body_json(app.get(&format!("/users/{}", id), None).await).await;

    assert_eq!(profile["user"]["name"], "Moe");
    assert_eq!(profile["items"][0]["name"], "Bamboo Flyrod");
}

#[tokio::test]
async fn test_sign_out() {
    let app = TestApp::new().await;
    app.sign_up("Larry", "larry@example.com").await;
    let larry = app.sign_in("larry@example.com").await;

    let response = app.request(Method::DELETE, "/session", Some(&larry), None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(body_json(response).await["notice"], "You're now signed out!");
}
