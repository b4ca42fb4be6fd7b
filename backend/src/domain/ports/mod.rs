//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UsersQuery`], [`UsersCommand`]) are consumed by inbound
//! adapters. Driven ports ([`UserRepository`], [`PasswordHasher`]) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
