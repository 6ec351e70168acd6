//! Item handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::extractors::{CurrentUser, JsonBody, OptionalJsonBody};
use crate::api::AppState;
use crate::config::ITEMS_PATH;
use crate::domain::{
    CommentResponse, Condition, FieldError, FieldErrors, Item, ItemForm, ItemResponse, ItemScope,
};
use crate::errors::{AppError, AppResult};
use crate::services::ItemDetail;
use crate::types::Redirect;

/// Path of an item's detail page
pub fn item_path(id: Uuid) -> String {
    format!("{}/{}", ITEMS_PATH, id)
}

/// Listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndexQuery {
    /// `for_sale`, `sold` or `recent`; all items when absent
    pub scope: Option<String>,
    /// Restrict to for-sale items in this condition, e.g. `Like New`
    pub condition: Option<String>,
}

impl IndexQuery {
    fn scope(&self) -> AppResult<ItemScope> {
        if let Some(condition) = self.condition.as_deref() {
            let condition = condition
                .parse::<Condition>()
                .map_err(|e| AppError::bad_request(e.to_string()))?;
            return Ok(ItemScope::InCondition(condition));
        }

        match self.scope.as_deref() {
            None | Some("") | Some("all") => Ok(ItemScope::All),
            Some("for_sale") => Ok(ItemScope::ForSale),
            Some("sold") => Ok(ItemScope::Sold),
            Some("recent") => Ok(ItemScope::Recent),
            Some(other) => Err(AppError::bad_request(format!("unknown scope '{}'", other))),
        }
    }
}

/// Item form page: the submitted values, allowed conditions and any errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemFormView {
    pub item: ItemForm,
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ItemFormView {
    fn new(item: ItemForm) -> Self {
        Self {
            item,
            conditions: Condition::ALL.to_vec(),
            errors: Vec::new(),
        }
    }

    fn rejected(item: ItemForm, errors: FieldErrors) -> Self {
        Self {
            errors: errors.into_vec(),
            ..Self::new(item)
        }
    }
}

/// Owner as shown next to an item
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerSummary {
    pub id: Uuid,
    #[schema(example = "Shemp")]
    pub name: String,
}

/// Item detail page
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemDetailResponse {
    pub item: ItemResponse,
    pub owner: OwnerSummary,
    pub comments: Vec<CommentResponse>,
}

impl From<ItemDetail> for ItemDetailResponse {
    fn from(detail: ItemDetail) -> Self {
        Self {
            item: ItemResponse::from(detail.item),
            owner: OwnerSummary {
                id: detail.owner.id,
                name: detail.owner.name,
            },
            comments: detail.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Mark-sold request; the date defaults to today
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MarkSoldRequest {
    #[schema(example = "2014-01-02")]
    pub sold_on: Option<NaiveDate>,
}

/// Create item routes
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/new", get(new_item))
        .route(
            "/:id",
            get(get_item)
                .put(update_item)
                .patch(update_item)
                .delete(destroy_item),
        )
        .route("/:id/edit", get(edit_item))
        .route("/:id/sold", post(mark_sold))
}

/// Redirect to the item on success, re-render the form on validation errors.
fn saved_or_rejected(result: AppResult<Item>, form: ItemForm, notice: &str) -> AppResult<Response> {
    match result {
        Ok(item) => Ok(Redirect::to(item_path(item.id)).with_notice(notice).into_response()),
        Err(AppError::Validation(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ItemFormView::rejected(form, errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// List items
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    params(IndexQuery),
    responses(
        (status = 200, description = "Items in the requested scope", body = Vec<ItemResponse>),
        (status = 400, description = "Unknown scope or condition")
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state.item_service.list_items(query.scope()?).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Blank item form
#[utoipa::path(
    get,
    path = "/items/new",
    tag = "Items",
    responses(
        (status = 200, description = "Empty form", body = ItemFormView),
        (status = 303, description = "Not signed in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn new_item(_user: CurrentUser) -> Json<ItemFormView> {
    Json(ItemFormView::new(ItemForm::default()))
}

/// Create an item
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = ItemForm,
    responses(
        (status = 303, description = "Created; redirect to the item"),
        (status = 422, description = "Form rejected", body = ItemFormView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(form): JsonBody<ItemForm>,
) -> AppResult<Response> {
    let result = state.item_service.create_item(&user, &form).await;
    saved_or_rejected(result, form, "Item was successfully created!")
}

/// Show an item with its comments
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = ItemDetailResponse),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemDetailResponse>> {
    let detail = state.item_service.show_item(id).await?;
    Ok(Json(ItemDetailResponse::from(detail)))
}

/// Edit form for one of your items
#[utoipa::path(
    get,
    path = "/items/{id}/edit",
    tag = "Items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Prefilled form", body = ItemFormView),
        (status = 303, description = "Not signed in, or not your item")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemFormView>> {
    let item = state.item_service.find_owned(&user, id).await?;
    Ok(Json(ItemFormView::new(ItemForm::from_item(&item))))
}

/// Update one of your items
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ItemForm,
    responses(
        (status = 303, description = "Updated; redirect to the item, or home when not yours"),
        (status = 422, description = "Form rejected", body = ItemFormView)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<ItemForm>,
) -> AppResult<Response> {
    let result = state.item_service.update_item(&user, id, &form).await;
    saved_or_rejected(result, form, "Item was successfully updated!")
}

/// Delete one of your items
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 303, description = "Deleted; redirect to the listing, or home when not yours")
    ),
    security(("bearer_auth" = []))
)]
pub async fn destroy_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    state.item_service.destroy_item(&user, id).await?;
    Ok(Redirect::to(ITEMS_PATH).with_alert("Item was successfully deleted!"))
}

/// Mark one of your items sold
#[utoipa::path(
    post,
    path = "/items/{id}/sold",
    tag = "Items",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body(content = MarkSoldRequest, description = "Optional sale date"),
    responses(
        (status = 303, description = "Marked sold; redirect to the item, or home when not yours"),
        (status = 400, description = "Malformed body")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_sold(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    OptionalJsonBody(request): OptionalJsonBody<MarkSoldRequest>,
) -> AppResult<Redirect> {
    let sold_on = request.and_then(|r| r.sold_on);
    let item = state.item_service.mark_sold(&user, id, sold_on).await?;
    Ok(Redirect::to(item_path(item.id)).with_notice("Item was marked as sold!"))
}
