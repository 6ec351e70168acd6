//! User handlers: signup, profiles and account management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::{CurrentUser, JsonBody};
use crate::api::AppState;
use crate::config::ROOT_PATH;
use crate::domain::{FieldError, FieldErrors, ItemResponse, User, UserForm, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::Redirect;

fn user_path(id: Uuid) -> String {
    format!("/users/{}", id)
}

/// Account form page
#[derive(Debug, Serialize, ToSchema)]
pub struct UserFormView {
    pub user: UserForm,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl UserFormView {
    fn new(user: UserForm) -> Self {
        Self {
            user,
            errors: Vec::new(),
        }
    }

    fn rejected(user: UserForm, errors: FieldErrors) -> Self {
        Self {
            user,
            errors: errors.into_vec(),
        }
    }
}

/// A user's public profile
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    pub user: UserResponse,
    pub items: Vec<ItemResponse>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/new", get(new_user))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/:id/edit", get(edit_user))
}

/// Redirect to the profile on success, re-render the form on validation errors.
fn saved_or_rejected(result: AppResult<User>, form: UserForm, notice: &str) -> AppResult<Response> {
    match result {
        Ok(user) => Ok(Redirect::to(user_path(user.id)).with_notice(notice).into_response()),
        Err(AppError::Validation(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(UserFormView::rejected(form, errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<UserResponse>))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Blank signup form
#[utoipa::path(
    get,
    path = "/signup",
    tag = "Users",
    responses((status = 200, description = "Empty signup form", body = UserFormView))
)]
pub async fn new_user() -> Json<UserFormView> {
    Json(UserFormView::new(UserForm::default()))
}

/// Sign up
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserForm,
    responses(
        (status = 303, description = "Account created; redirect to the profile"),
        (status = 422, description = "Form rejected", body = UserFormView)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<UserForm>,
) -> AppResult<Response> {
    let result = state.user_service.register(&form).await;
    saved_or_rejected(result, form, "Thanks for signing up!")
}

/// User profile with their items
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserProfileResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserProfileResponse>> {
    let user = state.user_service.get_user(id).await?;
    let items = state.item_service.list_by_owner(user.id).await?;

    Ok(Json(UserProfileResponse {
        user: UserResponse::from(user),
        items: items.into_iter().map(ItemResponse::from).collect(),
    }))
}

/// Edit form for your own account
#[utoipa::path(
    get,
    path = "/users/{id}/edit",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Prefilled form", body = UserFormView),
        (status = 303, description = "Not signed in, or not your account")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserFormView>> {
    let user = state.user_service.find_own(&actor, id).await?;
    Ok(Json(UserFormView::new(UserForm::from_user(&user))))
}

/// Update your own account
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UserForm,
    responses(
        (status = 303, description = "Updated; redirect to the profile, or home when not yours"),
        (status = 422, description = "Form rejected", body = UserFormView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<UserForm>,
) -> AppResult<Response> {
    let result = state.user_service.update_user(&actor, id, &form).await;
    saved_or_rejected(result, form, "Account successfully updated!")
}

/// Delete your own account, with your items and comments
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 303, description = "Deleted; redirect home")),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    state.user_service.delete_user(&actor, id).await?;
    Ok(Redirect::to(ROOT_PATH).with_alert("Account successfully deleted!"))
}
