//! Users service library: an HTTP CRUD API over a single SQLite `users`
//! table.
//!
//! Layout follows a hexagonal split:
//! - [`domain`]: user values, ports and the user service;
//! - [`inbound`]: Actix HTTP handlers and routing;
//! - [`outbound`]: Diesel/SQLite persistence and Argon2 hashing;
//! - [`middleware`]: request tracing;
//! - [`settings`]: OrthoConfig-backed configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
