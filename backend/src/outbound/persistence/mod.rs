//! SQLite persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and contain no business logic. Row structs (`models.rs`) and the schema
//! (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use users_service::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! run_pending_migrations("data.db").await?;
//! let pool = DbPool::new(PoolConfig::new("data.db")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
