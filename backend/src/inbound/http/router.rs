//! Route table for the HTTP adapter.
//!
//! Every path is registered as a resource whose default service answers
//! `405`; anything that matches no resource falls through to the app-level
//! `404`. Both fallbacks, and JSON decoding failures, answer with the same
//! JSON error body as the handlers.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::error::JsonPayloadError;
use actix_web::{App, HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::Trace;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;

async fn method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(format!(
        "method {} not allowed on {}",
        req.method(),
        req.path()
    )))
}

async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!("no route for {}", req.path())))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": "invalid_json" }))
        .into()
}

/// Register the user and health routes on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::resource("/")
                .route(web::get().to(users::root))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/users")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/users/")
                .route(web::put().to(users::update_user_from_body))
                .route(web::delete().to(users::delete_without_id))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/users/{id}")
                .route(web::put().to(users::update_user))
                .route(web::delete().to(users::delete_user))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health/ready")
                .route(web::get().to(health::ready))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health/live")
                .route(web::get().to(health::live))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Build the application with tracing, routes and the `404` fallback.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use users_service::inbound::http::health::HealthState;
/// use users_service::inbound::http::router::build_app;
/// use users_service::inbound::http::state::HttpState;
///
/// fn factory(state: web::Data<HttpState>, health: web::Data<HealthState>) {
///     let _app = build_app(state, health);
/// }
/// ```
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found))
}
