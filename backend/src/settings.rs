//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags (`--bind-addr`), environment variables
//! (`USERS_BIND_ADDR`) or a configuration file, in OrthoConfig's usual
//! precedence. Unset values take the defaults declared on each field.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "data.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a valid `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr {
        /// Rejected input.
        value: String,
        /// Parser failure description.
        message: String,
    },
}

/// Runtime settings for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServiceSettings {
    /// Socket address the HTTP listener binds to.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// Path of the SQLite database file.
    #[ortho_config(default = String::from(DEFAULT_DATABASE_URL))]
    pub database_url: String,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServiceSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                message: err.to_string(),
            })
    }

    /// Database location.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Pool size.
    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}
