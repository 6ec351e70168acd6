//! User service - Accounts: signup, profile edits and removal.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::validation::BLANK;
use crate::domain::{FieldErrors, NewUser, Password, User, UserChanges, UserForm};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

const EMAIL_TAKEN: &str = "has already been taken";

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account from a signup form
    async fn register(&self, form: &UserForm) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// The account `id`, provided it is the actor's own
    async fn find_own(&self, actor: &User, id: Uuid) -> AppResult<User>;

    /// Update the actor's own account
    async fn update_user(&self, actor: &User, id: Uuid, form: &UserForm) -> AppResult<User>;

    /// Delete the actor's own account with its items and comments
    async fn delete_user(&self, actor: &User, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Record "has already been taken" when another account owns `email`.
    async fn check_email_free(
        &self,
        email: &str,
        except: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> AppResult<()> {
        if email.is_empty() {
            return Ok(());
        }
        if let Some(existing) = self.uow.users().find_by_email(email).await? {
            if Some(existing.id) != except {
                errors.push("email", EMAIL_TAKEN);
            }
        }
        Ok(())
    }
}

fn hash_password(plain_text: &str) -> AppResult<String> {
    Ok(Password::new(plain_text)?.into_string())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, form: &UserForm) -> AppResult<User> {
        let form = &form.normalized();
        let email = form.email.clone();
        let mut errors = form.validate_for_signup().err().unwrap_or_default();
        self.check_email_free(&email, None, &mut errors).await?;
        errors.into_result().map_err(AppError::Validation)?;

        let password = form
            .new_password()
            .ok_or_else(|| AppError::invalid_field("password", BLANK))?;
        let user = self
            .uow
            .users()
            .create(NewUser {
                name: form.name.trim().to_string(),
                email,
                password_hash: hash_password(password)?,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn find_own(&self, actor: &User, id: Uuid) -> AppResult<User> {
        if actor.id != id {
            return Err(AppError::NotOwner);
        }
        self.get_user(id).await
    }

    async fn update_user(&self, actor: &User, id: Uuid, form: &UserForm) -> AppResult<User> {
        let user = self.find_own(actor, id).await?;

        let form = &form.normalized();
        let email = form.email.clone();
        let mut errors = form.validate_for_update().err().unwrap_or_default();
        self.check_email_free(&email, Some(user.id), &mut errors).await?;
        errors.into_result().map_err(AppError::Validation)?;

        let password_hash = form.new_password().map(hash_password).transpose()?;
        let changes = UserChanges {
            name: form.name.trim().to_string(),
            email,
            password_hash,
        };

        self.uow.users().update(user.id, changes).await
    }

    async fn delete_user(&self, actor: &User, id: Uuid) -> AppResult<()> {
        let user = self.find_own(actor, id).await?;
        self.uow.users().delete(user.id).await?;

        tracing::info!(user_id = %user.id, "Account deleted");
        Ok(())
    }
}
