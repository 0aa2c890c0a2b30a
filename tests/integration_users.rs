mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    admin_token, create_inactive_student, create_test_admin, create_test_student, request, send,
    setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_paginates(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    for _ in 0..3 {
        create_test_student(&pool).await;
    }
    let (app, state) = setup_test_app(pool);
    let token = admin_token(&state, &admin);

    let (status, body) = send(&app, request("GET", "/api/admin/users?limit=2", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["meta"]["total"], 3);
    assert_eq!(body["data"]["meta"]["has_more"], true);

    let (_, body) = send(&app, request("GET", "/api/admin/users?limit=2&page=2", Some(&token), None)).await;
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_filters(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let active = create_test_student(&pool).await;
    create_inactive_student(&pool).await;
    let (app, state) = setup_test_app(pool);
    let token = admin_token(&state, &admin);

    let (_, body) = send(&app, request("GET", "/api/admin/users?is_active=false", Some(&token), None)).await;
    assert_eq!(body["data"]["meta"]["total"], 1);
    assert_eq!(body["data"]["users"][0]["is_active"], false);

    let fragment = &active.email[5..20];
    let (_, body) = send(
        &app,
        request("GET", &format!("/api/admin/users?search={fragment}"), Some(&token), None),
    )
    .await;
    assert_eq!(body["data"]["meta"]["total"], 1);
    assert_eq!(body["data"]["users"][0]["id"], active.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_hides_password_hash(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let student = create_test_student(&pool).await;
    let (app, state) = setup_test_app(pool);
    let token = admin_token(&state, &admin);

    let (status, body) = send(&app, request("GET", &format!("/api/admin/users/{}", student.id), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], student.email);
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        request("GET", &format!("/api/admin/users/{}", uuid::Uuid::new_v4()), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_with_huge_page_returns_empty_page(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    create_test_student(&pool).await;
    let (app, state) = setup_test_app(pool);
    let token = admin_token(&state, &admin);

    for query in ["page=9223372036854775807", "offset=9223372036854775807"] {
        let (status, body) = send(
            &app,
            request("GET", &format!("/api/admin/users?{query}"), Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{query}: {body}");
        assert!(body["data"]["users"].as_array().unwrap().is_empty());
        assert_eq!(body["data"]["meta"]["total"], 1);
        assert_eq!(body["data"]["meta"]["has_more"], false);
    }
}
