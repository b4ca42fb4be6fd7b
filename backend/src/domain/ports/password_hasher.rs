//! Driven port for turning plaintext passwords into stored digests.

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hasher failed to produce a digest.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way password digest function.
///
/// Implementations are CPU bound and synchronous; callers run them off the
/// async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of `password`.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;
}
