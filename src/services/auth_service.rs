//! Authentication service - Sessions for signed-in users.
//!
//! A session is a signed JWT naming the user. Signing in checks the
//! email/password pair; every later request resolves the token back into
//! a [`User`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{normalize_email, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Verified against when the email is unknown so both paths cost a hash check.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$8uWsWJmu1mYfOmbz3CgqoEMYSv6QjqsBb5VEgMyvDls";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// A successful sign-in
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: TokenResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// The user with this email if the password matches, otherwise `None`.
    ///
    /// An unknown email and a wrong password are indistinguishable.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;

    /// Authenticate and open a session
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignedIn>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a session token to its user
    async fn current_user(&self, token: &str) -> AppResult<User>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.uow.users().find_by_email(&normalize_email(email)).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(password);

        Ok(user.filter(|_| password_valid))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignedIn> {
        let user = self
            .authenticate(email, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = generate_token(&user, &self.config)?;
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignedIn { user, token })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn current_user(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token).map_err(|_| AppError::Unauthorized)?;

        // Token outlived its account
        self.uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
