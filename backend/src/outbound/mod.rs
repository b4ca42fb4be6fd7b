//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed repositories using Diesel ORM
//! - **security**: Argon2 password hashing
//!
//! Adapters convert between domain types and infrastructure representations.
//! They contain no business logic.

pub mod persistence;
pub mod security;
