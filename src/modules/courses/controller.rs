use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use coursehub_core::{ApiResponse, AppError};
use coursehub_models::{Course, CourseInput};

use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CourseService;

/// List active courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Active courses ordered by code", body = [Course])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = CourseService::list_active(&state.db).await?;
    Ok(ApiResponse::list(courses))
}

/// Get an active course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 404, description = "Course not found or inactive")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::get_active(&state.db, course_id).await?;
    Ok(ApiResponse::data(course))
}

/// List all courses, including inactive ones
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    responses(
        (status = 200, description = "All courses ordered by code", body = [Course]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required")
    ),
    tag = "Admin: Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn admin_list_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = CourseService::list_all(&state.db).await?;
    Ok(ApiResponse::list(courses))
}

#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CourseInput,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid input or duplicate code"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required")
    ),
    tag = "Admin: Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn admin_create_course(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    ValidatedJson(dto): ValidatedJson<CourseInput>,
) -> Result<(StatusCode, ApiResponse<Course>), AppError> {
    let course = CourseService::create(&state.db, dto).await?;

    info!(admin_id = %admin.id(), course_id = %course.id, code = %course.code, "Course created");

    Ok((
        StatusCode::CREATED,
        ApiResponse::data(course).with_message("Course created"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "Course not found")
    ),
    tag = "Admin: Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn admin_get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::get(&state.db, course_id).await?;
    Ok(ApiResponse::data(course))
}

#[utoipa::path(
    put,
    path = "/api/admin/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CourseInput,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Invalid input or duplicate code"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "Course not found")
    ),
    tag = "Admin: Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn admin_update_course(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CourseInput>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::replace(&state.db, course_id, dto).await?;

    info!(admin_id = %admin.id(), course_id = %course.id, "Course updated");

    Ok(ApiResponse::data(course).with_message("Course updated"))
}

#[utoipa::path(
    delete,
    path = "/api/admin/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course and its content deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "Course not found")
    ),
    tag = "Admin: Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn admin_delete_course(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(course_id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    CourseService::delete(&state.db, course_id).await?;

    info!(admin_id = %admin.id(), course_id = %course_id, "Course deleted");

    Ok(ApiResponse::message("Course deleted"))
}
