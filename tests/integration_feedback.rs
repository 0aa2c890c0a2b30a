mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use common::{
    admin_token, create_test_admin, create_test_course, create_test_student, request, send,
    setup_test_app, student_token,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_student_submits_and_admin_reviews(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let admin = create_test_admin(&pool).await;
    let course_id = create_test_course(&pool, true).await;
    let (app, state) = setup_test_app(pool);
    let student_jwt = student_token(&state, &student);
    let admin_jwt = admin_token(&state, &admin);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/feedback",
            Some(&student_jwt),
            Some(json!({"subject": "Pace", "message": "A bit fast", "rating": 4, "course_id": course_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_id"], student.id.to_string());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/feedback",
            Some(&student_jwt),
            Some(json!({"subject": "General", "message": "Love the site"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, request("GET", "/api/admin/feedback", Some(&admin_jwt), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["subject"], "General");

    let (_, body) = send(
        &app,
        request("GET", &format!("/api/admin/feedback?course_id={course_id}"), Some(&admin_jwt), None),
    )
    .await;
    assert_eq!(body["count"], 1);
    let id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, request("DELETE", &format!("/api/admin/feedback/{id}"), Some(&admin_jwt), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("DELETE", &format!("/api/admin/feedback/{id}"), Some(&admin_jwt), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_feedback_validation(pool: PgPool) {
    let student = create_test_student(&pool).await;
    let (app, state) = setup_test_app(pool);
    let token = student_token(&state, &student);

    let (status, _) = send(
        &app,
        request("POST", "/api/feedback", Some(&token), Some(json!({"subject": "Bad", "message": "x", "rating": 9}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/feedback",
            Some(&token),
            Some(json!({"subject": "Ghost", "message": "x", "course_id": Uuid::new_v4()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_feedback_requires_student_token(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let (app, state) = setup_test_app(pool);

    let body = json!({"subject": "Hi", "message": "From an admin"});
    let (status, _) = send(
        &app,
        request("POST", "/api/feedback", Some(&admin_token(&state, &admin)), Some(body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, request("POST", "/api/feedback", None, Some(body))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
