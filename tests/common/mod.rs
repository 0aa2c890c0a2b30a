#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use coursehub::coursehub_auth::{PrincipalKind, issue_token};
use coursehub::coursehub_cache::CacheConfig;
use coursehub::coursehub_config::{CorsConfig, JwtConfig};
use coursehub::coursehub_core::hash_password;
use coursehub::router::init_router;
use coursehub::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestPrincipal {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(
        pool,
        JwtConfig::with_secret(TEST_SECRET),
        CorsConfig::from_origins("http://localhost:3000"),
        &CacheConfig::default(),
    )
}

/// The router and the state behind it. Clone the router per request; the
/// clones share one gate and one cache.
pub fn setup_test_app(pool: PgPool) -> (Router, AppState) {
    let state = test_state(pool);
    (init_router(state.clone()), state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_code() -> String {
    format!("T{}", &Uuid::new_v4().simple().to_string()[..8]).to_uppercase()
}

async fn insert_principal(
    pool: &PgPool,
    table: &str,
    email: &str,
    password: &str,
    is_active: bool,
) -> TestPrincipal {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(&format!(
        "INSERT INTO {table} (name, email, password_hash, is_active)
         VALUES ($1, $2, $3, $4)
         RETURNING id"
    ))
    .bind("Test Principal")
    .bind(email)
    .bind(hashed)
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestPrincipal {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub async fn create_test_admin(pool: &PgPool) -> TestPrincipal {
    insert_principal(pool, "admins", &generate_unique_email(), "adminpass123", true).await
}

pub async fn create_test_student(pool: &PgPool) -> TestPrincipal {
    insert_principal(pool, "users", &generate_unique_email(), "studentpass123", true).await
}

pub async fn create_inactive_student(pool: &PgPool) -> TestPrincipal {
    insert_principal(pool, "users", &generate_unique_email(), "studentpass123", false).await
}

pub async fn create_test_course(pool: &PgPool, is_active: bool) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO courses (code, title, is_active) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(generate_unique_code())
    .bind("Test Course")
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn token_for(state: &AppState, kind: PrincipalKind, id: Uuid) -> String {
    issue_token(id, kind, &state.jwt_config).unwrap()
}

pub fn admin_token(state: &AppState, admin: &TestPrincipal) -> String {
    token_for(state, PrincipalKind::Admin, admin.id)
}

pub fn student_token(state: &AppState, student: &TestPrincipal) -> String {
    token_for(state, PrincipalKind::User, student.id)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends `req` through a clone of `app` and parses the JSON body.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
