//! Signed-in user, resolved from the bearer token on each request.

use std::ops::Deref;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// The user behind the request's session token.
///
/// Rejects with [`AppError::Unauthorized`], which redirects to the
/// sign-in page, when the token is missing, invalid, expired, or names a
/// deleted account.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
            .ok_or(AppError::Unauthorized)?;

        let user = state.auth_service.current_user(token).await?;
        Ok(CurrentUser(user))
    }
}
