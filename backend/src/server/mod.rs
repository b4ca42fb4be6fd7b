//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use users_service::ApiDoc;
use users_service::domain::UserService;
use users_service::inbound::http::health::HealthState;
use users_service::inbound::http::router::build_app;
use users_service::inbound::http::state::HttpState;
use users_service::outbound::persistence::DieselUserRepository;
use users_service::outbound::security::Argon2PasswordHasher;

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(Argon2PasswordHasher::default()),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone(), server_health_state.clone());

        #[cfg(debug_assertions)]
        let app = app
            .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?
    .run();

    info!(bind_addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
