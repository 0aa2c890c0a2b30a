mod common;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use coursehub::coursehub_core::AppError;
use coursehub::coursehub_models::VerifiedProfile;
use coursehub::modules::auth::provider::IdentityProvider;
use coursehub::router::init_router;
use coursehub::state::AppState;

use common::{create_test_admin, create_test_student, request, send, setup_test_app, test_state};

/// Accepts a fixed set of credentials, each vouching for one profile.
#[derive(Debug, Default)]
struct FakeProvider {
    profiles: HashMap<String, VerifiedProfile>,
}

impl FakeProvider {
    fn with_profile(mut self, credential: &str, profile: VerifiedProfile) -> Self {
        self.profiles.insert(credential.to_string(), profile);
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn verify(&self, credential: &str) -> Result<VerifiedProfile, AppError> {
        self.profiles
            .get(credential)
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Identity credential rejected".to_string()))
    }
}

fn profile(external_id: &str, email: &str) -> VerifiedProfile {
    VerifiedProfile {
        external_id: external_id.to_string(),
        email: email.to_string(),
        name: "Ada Lovelace".to_string(),
    }
}

fn app_with_provider(pool: PgPool, provider: FakeProvider) -> (Router, AppState) {
    let state = test_state(pool).with_identity_provider(Arc::new(provider));
    (init_router(state.clone()), state)
}

fn unique_subject() -> String {
    format!("sub-{}", Uuid::new_v4())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_first_external_login_creates_student_then_reuses_it(pool: PgPool) {
    let subject = unique_subject();
    let email = format!("{}@Uni.EDU", Uuid::new_v4());
    let provider = FakeProvider::default().with_profile("good", profile(&subject, &email));
    let (app, _) = app_with_provider(pool.clone(), provider);

    let (status, first) = send(
        &app,
        request("POST", "/api/auth/external", None, Some(json!({"credential": "good"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert!(first["data"]["token"].as_str().is_some());
    assert_eq!(first["data"]["user"]["external_id"], subject);
    assert_eq!(first["data"]["user"]["email"], email.to_lowercase());
    assert!(!first["data"]["user"]["last_login_at"].is_null());

    let (status, second) = send(
        &app,
        request("POST", "/api/auth/external", None, Some(json!({"credential": "good"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"]["user"]["id"], first["data"]["user"]["id"]);

    let (count, password_hash): (i64, Option<String>) = sqlx::query_as(
        "SELECT COUNT(*) OVER (), password_hash FROM users WHERE external_id = $1",
    )
    .bind(&subject)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert!(password_hash.is_none());

    let token = second["data"]["token"].as_str().unwrap();
    let (status, me) = send(&app, request("GET", "/api/auth/me", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["kind"], "user");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_external_login_for_deactivated_student(pool: PgPool) {
    let subject = unique_subject();
    let provider = FakeProvider::default()
        .with_profile("good", profile(&subject, &format!("{}@uni.edu", Uuid::new_v4())));
    let (app, _) = app_with_provider(pool.clone(), provider);
    let body = json!({"credential": "good"});

    let (status, _) = send(&app, request("POST", "/api/auth/external", None, Some(body.clone()))).await;
    assert_eq!(status, StatusCode::OK);

    sqlx::query("UPDATE users SET is_active = FALSE WHERE external_id = $1")
        .bind(&subject)
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = send(&app, request("POST", "/api/auth/external", None, Some(body))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account has been deactivated");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_external_login_rejected_credential(pool: PgPool) {
    let (app, _) = app_with_provider(pool, FakeProvider::default());

    let (status, _) = send(
        &app,
        request("POST", "/api/auth/external", None, Some(json!({"credential": "forged"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_external_login_with_email_of_password_account(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let provider =
        FakeProvider::default().with_profile("good", profile(&unique_subject(), &student.email));
    let (app, _) = app_with_provider(pool, provider);

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/external", None, Some(json!({"credential": "good"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "An account with this email already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_external_login_requires_linked_account(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let subject = unique_subject();
    let provider = FakeProvider::default().with_profile("admin", profile(&subject, &admin.email));
    let (app, _) = app_with_provider(pool.clone(), provider);
    let body = json!({"credential": "admin"});

    let (status, body_out) =
        send(&app, request("POST", "/api/auth/admin/external", None, Some(body.clone()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body_out["message"], "No account is linked to this identity");

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);

    sqlx::query("UPDATE admins SET external_id = $1 WHERE id = $2")
        .bind(&subject)
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, body_out) =
        send(&app, request("POST", "/api/auth/admin/external", None, Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body_out["data"]["admin"]["id"], admin.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_external_login_disabled_without_provider(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/external", None, Some(json!({"credential": "anything"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "External sign-in is not configured");
}
