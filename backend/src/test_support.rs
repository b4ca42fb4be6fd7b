//! Helpers for integration tests, enabled by the `test-support` feature.
//!
//! [`TestDatabase`] owns a temporary directory holding a migrated SQLite file
//! and hands out pools over it. The directory is removed on drop.

use std::sync::Arc;

use argon2::Params;
use tempfile::TempDir;

use crate::domain::UserService;
use crate::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Errors raised while preparing a test database.
#[derive(Debug, thiserror::Error)]
pub enum TestDatabaseError {
    /// Creating the temporary directory failed.
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[from] std::io::Error),
    /// Applying migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// Building the pool failed.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Migrated SQLite database in a temporary directory.
pub struct TestDatabase {
    _dir: TempDir,
    url: String,
}

impl TestDatabase {
    /// Create the database file and apply all migrations.
    pub async fn new() -> Result<Self, TestDatabaseError> {
        let dir = tempfile::tempdir()?;
        let url = dir.path().join("users.db").to_string_lossy().into_owned();
        run_pending_migrations(&url).await?;
        Ok(Self { _dir: dir, url })
    }

    /// Path of the database file.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build a small pool over the database.
    pub async fn pool(&self) -> Result<DbPool, TestDatabaseError> {
        let config = PoolConfig::new(self.url.clone())
            .with_max_size(4)
            .with_min_idle(None);
        Ok(DbPool::new(config).await?)
    }
}

/// Argon2id hasher with minimal cost so tests stay fast.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    match Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None) {
        Ok(params) => Argon2PasswordHasher::new(params),
        Err(_) => Argon2PasswordHasher::default(),
    }
}

/// User service wired to `pool` and [`fast_password_hasher`].
pub fn user_service(pool: DbPool) -> Arc<UserService<DieselUserRepository, Argon2PasswordHasher>> {
    Arc::new(UserService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(fast_password_hasher()),
    ))
}
