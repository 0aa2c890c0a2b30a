mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    admin_token, create_inactive_student, create_test_admin, create_test_student,
    generate_unique_email, request, send, setup_test_app, student_token,
};
use coursehub::coursehub_auth::{PrincipalKind, issue_token};
use coursehub::coursehub_config::JwtConfig;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let (app, _) = setup_test_app(pool);
    let email = generate_unique_email().to_uppercase();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"name": "Grace Hopper", "email": email, "password": "compilers1"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], email.to_lowercase());
    assert!(body["data"]["user"].get("password_hash").is_none());
    assert!(body["data"].get("admin").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"name": "Copy", "email": student.email, "password": "whatever123"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"name": "Short", "email": generate_unique_email(), "password": "short"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success_refreshes_last_login(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": student.email, "password": student.password})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["id"], student.id.to_string());
    assert!(body["data"]["user"]["last_login_at"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": student.email, "password": "not-the-password"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@test.com", "password": "whatever123"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_student_forbidden(pool: PgPool) {
    let student = create_inactive_student(&pool).await;
    let (app, _) = setup_test_app(pool);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": student.email, "password": student.password})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_external_account_without_password(pool: PgPool) {
    let email = generate_unique_email();
    sqlx::query("INSERT INTO users (name, email, external_id) VALUES ($1, $2, $3)")
        .bind("SSO Student")
        .bind(&email)
        .bind("sso|12345")
        .execute(&pool)
        .await
        .unwrap();
    let (app, _) = setup_test_app(pool);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": email, "password": "anything123"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_login_is_separate_from_student_login(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/admin/login",
            None,
            Some(json!({"email": admin.email, "password": admin.password})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["admin"]["id"], admin.id.to_string());
    assert!(body["data"].get("user").is_none());

    // Admin credentials are not valid on the student endpoint
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": admin.email, "password": admin.password})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_endpoints_check_principal_kind(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let admin = create_test_admin(&pool).await;
    let (app, state) = setup_test_app(pool);
    let student_jwt = student_token(&state, &student);
    let admin_jwt = admin_token(&state, &admin);

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&student_jwt), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["kind"], "user");
    assert_eq!(body["data"]["email"], student.email);

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&admin_jwt), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, body) =
        send(&app, request("GET", "/api/auth/admin/me", Some(&admin_jwt), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["kind"], "admin");

    let (status, _) =
        send(&app, request("GET", "/api/auth/admin/me", Some(&student_jwt), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_rejects_missing_and_malformed_tokens(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let (status, body) = send(&app, request("GET", "/api/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token provided");

    let (status, body) =
        send(&app, request("GET", "/api/auth/me", Some("not.a.token"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token is invalid");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_token_rejected_for_active_student(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let (app, state) = setup_test_app(pool);

    let expired_config = JwtConfig {
        user_token_expiry: -60,
        ..state.jwt_config.clone()
    };
    let token = issue_token(student.id, PrincipalKind::User, &expired_config).unwrap();

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token has expired, please log in again");
}
