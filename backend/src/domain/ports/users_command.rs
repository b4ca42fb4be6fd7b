//! Driving port for user mutations.
//!
//! The [`UsersCommand`] trait is the inbound contract for creating, replacing
//! and deleting users. Payload validation has already produced a
//! [`UserDraft`]; implementations enforce email uniqueness and hash the
//! password before anything reaches the store.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId};

/// Domain use-case port for user writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the email is
    /// already taken and [`crate::domain::ErrorCode::InternalError`] on
    /// storage or hashing failures.
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Replace every field of user `id`, returning the affected row count.
    ///
    /// A missing user is not an error; the count is zero.
    ///
    /// # Errors
    ///
    /// Same as [`UsersCommand::create_user`], except that the user's own
    /// current email never counts as a duplicate.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<u64, Error>;

    /// Delete user `id`. Deleting a missing user succeeds.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
