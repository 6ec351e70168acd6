//! Application route configuration.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    comment_routes, health, item_routes, list_items, new_user, session_routes, user_routes,
};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Home page is the item listing
        .route("/", get(list_items))
        .route("/health", get(health))
        .route("/signup", get(new_user))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/items", item_routes().merge(comment_routes()))
        .nest("/users", user_routes())
        .nest("/session", session_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
