//! Comment handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::item_handler::item_path;
use crate::api::extractors::{CurrentUser, JsonBody};
use crate::api::AppState;
use crate::domain::{CommentForm, CommentResponse};
use crate::errors::AppResult;
use crate::types::{Created, Redirect};

/// How the client wants the result of a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Redirect back to the item page
    #[default]
    Html,
    /// Return the new comment for in-place insertion
    Js,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormatQuery {
    /// `html` (default) or `js`
    #[serde(default)]
    pub format: ResponseFormat,
}

/// Create comment routes, nested under an item
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/:id/comments", post(create_comment))
}

/// Comment on an item
#[utoipa::path(
    post,
    path = "/items/{id}/comments",
    tag = "Comments",
    params(("id" = Uuid, Path, description = "Item ID"), FormatQuery),
    request_body = CommentForm,
    responses(
        (status = 201, description = "Comment posted (format=js)", body = CommentResponse),
        (status = 303, description = "Comment posted (format=html), or not signed in"),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Comment rejected"),
        (status = 500, description = "Comment saved but the owner could not be emailed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
    JsonBody(form): JsonBody<CommentForm>,
) -> AppResult<Response> {
    let posted = state
        .comment_service
        .create_comment(&user, item_id, &form)
        .await?;

    Ok(match query.format {
        ResponseFormat::Html => Redirect::to(item_path(item_id)).into_response(),
        ResponseFormat::Js => Created(CommentResponse::from(posted)).into_response(),
    })
}
