//! User domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! the [`UserRepository`] and [`PasswordHasher`] driven ports. Uniqueness of
//! email addresses is checked here before any write so callers get a
//! validation failure instead of a storage error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    PasswordHasher, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{EmailAddress, Error, Password, PasswordDigest, User, UserDraft, UserId};

/// Message returned when an email is held by another user.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "email already exists";

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<R, H> UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Self::duplicate_email(),
        }
    }

    fn duplicate_email() -> Error {
        Error::invalid_request(DUPLICATE_EMAIL_MESSAGE).with_details(json!({
            "field": "email",
            "code": "duplicate_email",
        }))
    }

    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<(), Error> {
        let taken = self
            .repository
            .email_exists(email, exclude)
            .await
            .map_err(Self::map_persistence_error)?;
        if taken {
            warn!(exclude = ?exclude.map(UserId::get), "rejected write with duplicate email");
            return Err(Self::duplicate_email());
        }
        Ok(())
    }

    async fn digest(&self, password: &Password) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error> {
        self.ensure_email_available(draft.email(), None).await?;
        let digest = self.digest(draft.password()).await?;
        let record = draft.into_record(digest);

        let id = self
            .repository
            .insert(&record)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = id.get(), "user created");
        Ok(id)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<u64, Error> {
        self.ensure_email_available(draft.email(), Some(id)).await?;
        let digest = self.digest(draft.password()).await?;
        let record = draft.into_record(digest);

        let rows = self
            .repository
            .update(id, &record)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = id.get(), rows, "user updated");
        Ok(rows)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let rows = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = id.get(), rows, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
