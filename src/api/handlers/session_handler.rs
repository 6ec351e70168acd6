//! Session handlers: sign in and sign out.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::{CurrentUser, JsonBody};
use crate::api::AppState;
use crate::config::ROOT_PATH;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Redirect;

/// Sign-in request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SessionRequest {
    /// Account email (any case)
    #[serde(default)]
    #[schema(example = "larry@example.com")]
    pub email: String,
    #[serde(default, skip_serializing)]
    #[schema(example = "secret")]
    pub password: String,
}

/// Successful sign-in
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: TokenResponse,
    pub user: UserResponse,
    #[schema(example = "Welcome back, Larry!")]
    pub notice: String,
}

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(new_session).post(create_session).delete(destroy_session))
        .route("/new", get(new_session))
}

/// Blank sign-in form
#[utoipa::path(
    get,
    path = "/session/new",
    tag = "Session",
    responses((status = 200, description = "Empty sign-in form", body = SessionRequest))
)]
pub async fn new_session() -> Json<SessionRequest> {
    Json(SessionRequest::default())
}

/// Sign in
#[utoipa::path(
    post,
    path = "/session",
    tag = "Session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "Invalid email/password combination")
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    let signed_in = state
        .auth_service
        .sign_in(&request.email, &request.password)
        .await?;

    let notice = format!("Welcome back, {}!", signed_in.user.name);
    Ok(Json(SessionResponse {
        token: signed_in.token,
        user: UserResponse::from(signed_in.user),
        notice,
    }))
}

/// Sign out
///
/// Tokens are stateless; the client forgets its token.
#[utoipa::path(
    delete,
    path = "/session",
    tag = "Session",
    responses((status = 303, description = "Signed out; redirect home")),
    security(("bearer_auth" = []))
)]
pub async fn destroy_session(CurrentUser(user): CurrentUser) -> Redirect {
    tracing::info!(user_id = %user.id, "User signed out");
    Redirect::to(ROOT_PATH).with_notice("You're now signed out!")
}
