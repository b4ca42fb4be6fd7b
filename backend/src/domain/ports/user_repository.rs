//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUserRecord, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store rejected a write because the email is already taken.
        DuplicateEmail { email: String } => "email already stored: {email}",
    }
}

/// Storage contract for user records.
///
/// Adapters store password digests only and never return them from reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user in ascending identifier order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Report whether `email` is held by any user other than `exclude`.
    async fn email_exists(
        &self,
        email: &EmailAddress,
        exclude: Option<UserId>,
    ) -> Result<bool, UserPersistenceError>;

    /// Insert a record and return the identifier the store assigned.
    async fn insert(&self, record: &NewUserRecord) -> Result<UserId, UserPersistenceError>;

    /// Replace every field of the user with `id`, returning the affected row
    /// count (zero when no such user exists).
    async fn update(&self, id: UserId, record: &NewUserRecord)
    -> Result<u64, UserPersistenceError>;

    /// Delete the user with `id`, returning the affected row count.
    async fn delete(&self, id: UserId) -> Result<u64, UserPersistenceError>;
}
