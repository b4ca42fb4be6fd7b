//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users        {"name":"Ann","email":"ann@x.com","age":30,"password":"p"}
//! PUT    /api/users/{id}   {"name":"Ann","email":"ann@x.com","age":31,"password":"p"}
//! PUT    /api/users/       {"id":1,"name":"Ann","email":"ann@x.com","age":31,"password":"p"}
//! DELETE /api/users/{id}
//! ```
//!
//! Successful writes answer in plain text; reads and errors answer in JSON.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for create and update.
///
/// Every member is optional at the decoding stage; absent members count as
/// empty (or zero for `age`) and are rejected by validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    /// Target id. Ignored on create, required on `PUT /api/users/`.
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    /// Age in years.
    #[serde(default)]
    #[schema(example = 30)]
    pub age: Option<i64>,
    /// Plaintext password; stored only as a digest.
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.unwrap_or_default(),
            value.email.unwrap_or_default(),
            value.age.unwrap_or_default(),
            value.password.unwrap_or_default(),
        )
    }
}

/// User as listed by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Ann")]
    pub name: String,
    /// Contact email.
    #[schema(example = "ann@x.com")]
    pub email: String,
    /// Age in years.
    #[schema(example = 30)]
    pub age: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            age: user.age().get(),
        }
    }
}

/// Map a validation failure to a client error with field details.
pub fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>().map_err(map_user_validation_error)
}

fn plain_text(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body)
}

/// Liveness banner served at `/`.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = String, content_type = "text/plain")),
    tags = ["users"],
    operation_id = "root"
)]
pub async fn root() -> HttpResponse {
    plain_text(String::from("server is running"))
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_service::inbound::http::users::list_users;
///
/// let app = App::new().route("/api/users", web::get().to(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let id = state.users_command.create_user(draft).await?;
    Ok(plain_text(format!("User created with ID: {id}")))
}

async fn apply_update(
    state: &HttpState,
    id: UserId,
    request: UserRequest,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(request).map_err(map_user_validation_error)?;
    let rows = state.users_command.update_user(id, draft).await?;
    Ok(plain_text(format!("User updated: {rows} rows affected")))
}

/// Replace the user addressed by the path.
///
/// A body `id`, when present, must match the path.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Rows affected", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let request = payload.into_inner();
    if request.id.is_some_and(|body_id| body_id != id.get()) {
        return Err(
            Error::invalid_request("user id in body does not match path")
                .with_details(json!({ "field": "id", "code": "id_mismatch" })),
        );
    }
    apply_update(&state, id, request).await
}

/// Replace the user addressed by the body `id`.
#[utoipa::path(
    put,
    path = "/api/users/",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Rows affected", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserFromBody"
)]
pub async fn update_user_from_body(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let Some(raw_id) = request.id else {
        return Err(
            Error::invalid_request(UserValidationError::InvalidId.to_string())
                .with_details(json!({ "field": "id", "code": "missing_field" })),
        );
    };
    apply_update(&state, UserId::new(raw_id), request).await
}

/// Delete the user addressed by the path. Missing users are not an error.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /api/users/` carries no id and is always rejected.
pub async fn delete_without_id() -> ApiResult<HttpResponse> {
    Err(map_user_validation_error(UserValidationError::InvalidId))
}

#[cfg(test)]
mod tests;
