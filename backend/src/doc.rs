//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users and health endpoint together with the
//! request, response and error schemas. Swagger UI serves it in debug builds
//! and the `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::users::{UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users service API",
        description = "Create, list, update and delete user records.",
        license(name = "ISC", url = "https://opensource.org/licenses/ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::root,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::update_user_from_body,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserRequest, UserResponse, Error, ErrorCode)),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
