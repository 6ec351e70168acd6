//! Shared fixtures for integration tests: an in-memory SQLite database
//! with all migrations applied, plus mail transports that record or fail.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use classifieds::api::{create_router, AppState};
use classifieds::config::Config;
use classifieds::errors::{AppError, AppResult};
use classifieds::infra::{Database, EmailMessage, Mailer, Persistence};

/// Fresh database, migrated
pub async fn database() -> Arc<Database> {
    Arc::new(
        Database::connect("sqlite::memory:")
            .await
            .expect("in-memory database"),
    )
}

pub async fn persistence() -> (Arc<Database>, Arc<Persistence>) {
    let db = database().await;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    (db, uow)
}

/// Keeps every delivered message
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, message: EmailMessage) -> AppResult<()> {
        self.sent.lock().expect("mailer lock").push(message);
        Ok(())
    }
}

/// Refuses every message
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn deliver(&self, _message: EmailMessage) -> AppResult<()> {
        Err(AppError::mail("relay unavailable"))
    }
}

/// Router over a fresh database
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub db: Arc<Database>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let db = database().await;
        let state = AppState::from_config(db.clone(), mailer.clone(), Config::default());
        Self {
            router: create_router(state),
            mailer,
            db,
        }
    }

    pub async fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        let db = database().await;
        let state = AppState::from_config(db.clone(), mailer, Config::default());
        Self {
            router: create_router(state),
            mailer: Arc::new(RecordingMailer::default()),
            db,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Create an account and return its id
    pub async fn sign_up(&self, name: &str, email: &str) -> String {
        let response = self
            .post(
                "/users",
                None,
                serde_json::json!({ "name": name, "email": email, "password": "secret" }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
            .trim_start_matches("/users/")
            .to_string()
    }

    /// Sign in and return the session token
    pub async fn sign_in(&self, email: &str) -> String {
        let response = self
            .post(
                "/session",
                None,
                serde_json::json!({ "email": email, "password": "secret" }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        body["token"]["access_token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    /// Post an item and return its path
    pub async fn create_item(&self, token: &str, name: &str) -> String {
        let response = self.post("/items", Some(token), item_json(name, "99.00", "Good")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
    }
}

pub fn item_json(name: &str, price: &str, condition: &str) -> Value {
    serde_json::json!({
        "name": name,
        "description": "Lorem ipsum dolor sit amet, consectetur adipisicing elit.",
        "price": price,
        "condition": condition,
    })
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string()
}

pub async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
