//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::password::{too_short_message, Password};
use super::validation::{check, not_blank, FieldErrors, BLANK};
use crate::config::MIN_PASSWORD_LENGTH;

/// local@domain, no whitespace on either side
static EMAIL_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+$").expect("email pattern is valid"));

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check a plain text password against the stored hash
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }
}

/// Canonical form used for storage and lookup.
///
/// Lower-casing here is what makes email uniqueness case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Signup / account form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserForm {
    /// Display name
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Larry")]
    pub name: String,
    /// Email address (unique, case-insensitive)
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        regex(path = *EMAIL_FORMAT, message = "is invalid")
    )]
    #[schema(example = "larry@example.com")]
    pub email: String,
    /// Required on signup; leave blank on update to keep the current one
    #[serde(default, skip_serializing)]
    #[schema(example = "secret", min_length = 4)]
    pub password: Option<String>,
    /// Must equal `password` when given
    #[serde(default, skip_serializing)]
    #[schema(example = "secret")]
    pub password_confirmation: Option<String>,
}

impl UserForm {
    /// Prefill from an existing account (passwords are never echoed)
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: None,
            password_confirmation: None,
        }
    }

    /// Copy with the email in its stored form, so format rules see what
    /// will be saved
    pub fn normalized(&self) -> Self {
        Self {
            email: normalize_email(&self.email),
            ..self.clone()
        }
    }

    /// Rules for creating an account: a password is mandatory.
    pub fn validate_for_signup(&self) -> Result<(), FieldErrors> {
        let mut errors = check(self).err().unwrap_or_default();
        match self.new_password() {
            None => errors.push("password", BLANK),
            Some(password) => errors.extend(password_rules(password, self.password_confirmation.as_deref())),
        }
        errors.into_result()
    }

    /// Rules for editing an account: a blank password keeps the old one.
    pub fn validate_for_update(&self) -> Result<(), FieldErrors> {
        let mut errors = check(self).err().unwrap_or_default();
        if let Some(password) = self.new_password() {
            errors.extend(password_rules(password, self.password_confirmation.as_deref()));
        }
        errors.into_result()
    }

    /// The submitted password, ignoring blank input
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

fn password_rules(password: &str, confirmation: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if (password.chars().count() as u64) < MIN_PASSWORD_LENGTH {
        errors.push("password", too_short_message());
    }
    if let Some(confirmation) = confirmation {
        if confirmation != password {
            errors.push("password_confirmation", "doesn't match Password");
        }
    }
    errors
}

/// Validated account attributes ready for persistence
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Account changes; `password_hash` is `None` when the password is kept
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "Larry")]
    pub name: String,
    /// User email address
    #[schema(example = "larry@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
