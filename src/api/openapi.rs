//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    comment_handler, health_handler, item_handler, session_handler, user_handler,
};
use crate::domain::{
    CommentForm, CommentResponse, Condition, FieldError, ItemForm, ItemResponse, UserForm,
    UserResponse,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the classifieds marketplace
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Classifieds",
        version = "0.1.0",
        description = "Post items for sale, browse listings and comment on them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health,
        // Items
        item_handler::list_items,
        item_handler::new_item,
        item_handler::create_item,
        item_handler::get_item,
        item_handler::edit_item,
        item_handler::update_item,
        item_handler::destroy_item,
        item_handler::mark_sold,
        // Comments
        comment_handler::create_comment,
        // Users
        user_handler::list_users,
        user_handler::new_user,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::edit_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Session
        session_handler::new_session,
        session_handler::create_session,
        session_handler::destroy_session,
    ),
    components(
        schemas(
            // Domain types
            Condition,
            FieldError,
            ItemForm,
            ItemResponse,
            CommentForm,
            CommentResponse,
            UserForm,
            UserResponse,
            TokenResponse,
            // Views
            item_handler::ItemFormView,
            item_handler::ItemDetailResponse,
            item_handler::OwnerSummary,
            item_handler::MarkSoldRequest,
            comment_handler::ResponseFormat,
            user_handler::UserFormView,
            user_handler::UserProfileResponse,
            session_handler::SessionRequest,
            session_handler::SessionResponse,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Items", description = "Listings"),
        (name = "Comments", description = "Comments on items"),
        (name = "Users", description = "Signup and accounts"),
        (name = "Session", description = "Sign in and sign out"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token obtained from POST /session"))
                        .build(),
                ),
            );
        }
    }
}
