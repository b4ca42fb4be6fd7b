//! Handler tests for the users endpoints, driven through the full router
//! with an in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::router::build_app;
use crate::inbound::http::test_utils::{
    InMemoryUserRepository, MARKER_PREFIX, in_memory_state, ready_health,
};

#[fixture]
fn repo() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::default())
}

fn ann() -> Value {
    json!({ "name": "Ann", "email": "ann@x.com", "age": 30, "password": "p" })
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    has_trace_id: bool,
    body: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }

    fn detail_code(&self) -> Option<String> {
        self.json()
            .pointer("/details/code")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

async fn send(repo: &Arc<InMemoryUserRepository>, req: actix_test::TestRequest) -> Reply {
    let app = actix_test::init_service(build_app(in_memory_state(repo.clone()), ready_health()))
        .await;
    let res = actix_test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let has_trace_id = res.headers().contains_key(TRACE_ID_HEADER);
    let bytes = actix_test::read_body(res).await;
    Reply {
        status,
        content_type,
        has_trace_id,
        body: String::from_utf8(bytes.to_vec()).expect("utf8 body"),
    }
}

fn post_user(body: &Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn root_reports_running(repo: Arc<InMemoryUserRepository>) {
    let reply = send(&repo, actix_test::TestRequest::get().uri("/")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "server is running");
    assert!(
        reply
            .content_type
            .is_some_and(|ct| ct.starts_with("text/plain"))
    );
    assert!(reply.has_trace_id);
}

#[rstest]
#[actix_web::test]
async fn list_is_empty_array_initially(repo: Arc<InMemoryUserRepository>) {
    let reply = send(&repo, actix_test::TestRequest::get().uri("/api/users")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_then_list_round_trips_without_password(repo: Arc<InMemoryUserRepository>) {
    let created = send(&repo, post_user(&ann())).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body, "User created with ID: 1");

    let listed = send(&repo, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(
        listed.json(),
        json!([{ "id": 1, "name": "Ann", "email": "ann@x.com", "age": 30 }])
    );
    assert!(!listed.body.contains("password"));

    let stored = repo.record(1).expect("record stored");
    assert_eq!(stored.password().as_ref(), format!("{MARKER_PREFIX}p"));
}

#[rstest]
#[actix_web::test]
async fn create_ignores_body_id(repo: Arc<InMemoryUserRepository>) {
    let mut body = ann();
    body["id"] = json!(42);

    let reply = send(&repo, post_user(&body)).await;

    assert_eq!(reply.body, "User created with ID: 1");
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;
    let reply = send(&repo, post_user(&ann())).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["message"], "email already exists");
    assert_eq!(reply.detail_code().as_deref(), Some("duplicate_email"));
    assert!(repo.record(2).is_none());
}

#[rstest]
#[case(json!({ "name": "", "email": "ann@x.com", "age": 30, "password": "p" }), "empty_name")]
#[case(json!({ "name": "Ann", "age": 30, "password": "p" }), "empty_email")]
#[case(json!({ "name": "Ann", "email": "ann@x.com", "age": 30, "password": "  " }), "empty_password")]
#[case(json!({ "name": "Ann", "email": "ann@x.com", "age": 0, "password": "p" }), "non_positive_age")]
#[case(json!({ "name": "Ann", "email": "ann@x.com", "age": -4, "password": "p" }), "non_positive_age")]
#[case(json!({ "name": "Ann", "email": "not-an-email", "age": 30, "password": "p" }), "invalid_email")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    repo: Arc<InMemoryUserRepository>,
    #[case] body: Value,
    #[case] code: &str,
) {
    let reply = send(&repo, post_user(&body)).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["code"], "invalid_request");
    assert_eq!(reply.detail_code().as_deref(), Some(code));
}

#[rstest]
#[actix_web::test]
async fn required_fields_are_reported_before_email_format(repo: Arc<InMemoryUserRepository>) {
    let body = json!({ "name": "Ann", "email": "bad", "age": 0, "password": "p" });
    let reply = send(&repo, post_user(&body)).await;

    assert_eq!(
        reply.json()["message"],
        "all fields are required and age must be positive"
    );
}

#[rstest]
#[case(actix_test::TestRequest::post().uri("/api/users").insert_header((CONTENT_TYPE, "application/json")).set_payload("{not json"))]
#[case(actix_test::TestRequest::post().uri("/api/users").insert_header((CONTENT_TYPE, "application/json")).set_payload(r#"{"name":"Ann","age":"thirty"}"#))]
#[case(actix_test::TestRequest::post().uri("/api/users").insert_header((CONTENT_TYPE, "text/plain")).set_payload("hello"))]
#[actix_web::test]
async fn malformed_bodies_are_client_errors(
    repo: Arc<InMemoryUserRepository>,
    #[case] req: actix_test::TestRequest,
) {
    let reply = send(&repo, req).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.detail_code().as_deref(), Some("invalid_json"));
}

#[rstest]
#[actix_web::test]
async fn update_by_path_replaces_fields(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;

    let body = json!({ "name": "Ann B", "email": "annb@x.com", "age": 31, "password": "q" });
    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(&body),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "User updated: 1 rows affected");
    let stored = repo.record(1).expect("record stored");
    assert_eq!(stored.name().as_ref(), "Ann B");
    assert_eq!(stored.email().as_ref(), "annb@x.com");
    assert_eq!(stored.age().get(), 31);
}

#[rstest]
#[actix_web::test]
async fn update_keeping_own_email_is_allowed(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;

    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(&ann()),
    )
    .await;

    assert_eq!(reply.body, "User updated: 1 rows affected");
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_user_affects_zero_rows(repo: Arc<InMemoryUserRepository>) {
    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/99")
            .set_json(&ann()),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "User updated: 0 rows affected");
}

#[rstest]
#[actix_web::test]
async fn update_rejects_email_held_by_another_user(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;
    let bob = json!({ "name": "Bob", "email": "bob@x.com", "age": 40, "password": "p" });
    send(&repo, post_user(&bob)).await;

    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/2")
            .set_json(&ann()),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.detail_code().as_deref(), Some("duplicate_email"));
}

#[rstest]
#[actix_web::test]
async fn update_rejects_body_id_mismatch(repo: Arc<InMemoryUserRepository>) {
    let mut body = ann();
    body["id"] = json!(2);

    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(&body),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.detail_code().as_deref(), Some("id_mismatch"));
}

#[rstest]
#[actix_web::test]
async fn update_from_body_uses_body_id(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;
    let mut body = ann();
    body["id"] = json!(1);
    body["age"] = json!(45);

    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/")
            .set_json(&body),
    )
    .await;

    assert_eq!(reply.body, "User updated: 1 rows affected");
    assert_eq!(repo.record(1).expect("record").age().get(), 45);
}

#[rstest]
#[actix_web::test]
async fn update_from_body_requires_id(repo: Arc<InMemoryUserRepository>) {
    let reply = send(
        &repo,
        actix_test::TestRequest::put()
            .uri("/api/users/")
            .set_json(&ann()),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.detail_code().as_deref(), Some("missing_field"));
}

#[rstest]
#[case(actix_test::TestRequest::put().uri("/api/users/abc").set_json(ann()))]
#[case(actix_test::TestRequest::delete().uri("/api/users/abc"))]
#[case(actix_test::TestRequest::delete().uri("/api/users/"))]
#[actix_web::test]
async fn non_numeric_ids_are_rejected(
    repo: Arc<InMemoryUserRepository>,
    #[case] req: actix_test::TestRequest,
) {
    let reply = send(&repo, req).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["message"], "invalid user id");
    assert_eq!(reply.detail_code().as_deref(), Some("invalid_id"));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_user_and_returns_no_content(repo: Arc<InMemoryUserRepository>) {
    send(&repo, post_user(&ann())).await;

    let reply = send(&repo, actix_test::TestRequest::delete().uri("/api/users/1")).await;

    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.body.is_empty());
    assert!(repo.record(1).is_none());
}

#[rstest]
#[actix_web::test]
async fn delete_of_missing_user_succeeds(repo: Arc<InMemoryUserRepository>) {
    let reply = send(&repo, actix_test::TestRequest::delete().uri("/api/users/77")).await;

    assert_eq!(reply.status, StatusCode::NO_CONTENT);
}

#[rstest]
#[case(actix_test::TestRequest::patch().uri("/api/users"))]
#[case(actix_test::TestRequest::delete().uri("/api/users"))]
#[case(actix_test::TestRequest::get().uri("/api/users/1"))]
#[case(actix_test::TestRequest::post().uri("/health/ready"))]
#[actix_web::test]
async fn unsupported_methods_are_405(
    repo: Arc<InMemoryUserRepository>,
    #[case] req: actix_test::TestRequest,
) {
    let reply = send(&repo, req).await;

    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.json()["code"], "method_not_allowed");
}

#[rstest]
#[actix_web::test]
async fn unknown_paths_are_404(repo: Arc<InMemoryUserRepository>) {
    let reply = send(&repo, actix_test::TestRequest::get().uri("/api/people")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["code"], "not_found");
    assert!(reply.has_trace_id);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    use actix_web::web;

    use crate::domain::Error;
    use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
    use crate::inbound::http::error::REDACTED_MESSAGE;
    use crate::inbound::http::state::HttpState;

    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .return_once(|| Err(Error::internal("disk I/O error at /var/lib/users.db")));
    let mut command = MockUsersCommand::new();
    command.expect_create_user().never();

    let state = web::Data::new(HttpState::new(Arc::new(query), Arc::new(command)));
    let app = actix_test::init_service(build_app(state, ready_health())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], REDACTED_MESSAGE);
    assert!(body.get("traceId").is_some());
}
