//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side port.
    pub users: Arc<dyn UsersQuery>,
    /// Write-side port.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// A single service usually implements both ports:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use users_service::domain::UserService;
    /// use users_service::inbound::http::state::HttpState;
    /// use users_service::outbound::persistence::{DbPool, DieselUserRepository};
    /// use users_service::outbound::security::Argon2PasswordHasher;
    ///
    /// fn wire(pool: DbPool) -> HttpState {
    ///     let service = Arc::new(UserService::new(
    ///         Arc::new(DieselUserRepository::new(pool)),
    ///         Arc::new(Argon2PasswordHasher::default()),
    ///     ));
    ///     HttpState::new(service.clone(), service)
    /// }
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }
}
