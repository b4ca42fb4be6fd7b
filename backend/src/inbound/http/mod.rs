//! HTTP inbound adapter exposing the users REST endpoints.

pub mod error;
pub mod health;
pub mod router;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
