use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use coursehub_core::{ApiResponse, AppError};
use coursehub_models::{CreateFeedbackDto, Feedback, FeedbackFilterParams};

use crate::middleware::auth::{AuthAdmin, AuthStudent};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::FeedbackService;

/// Send feedback as the signed-in student
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a student token, or account deactivated"),
        (status = 404, description = "Course not found")
    ),
    tag = "Feedback",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, student, dto))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthStudent(student): AuthStudent,
    ValidatedJson(dto): ValidatedJson<CreateFeedbackDto>,
) -> Result<(StatusCode, ApiResponse<Feedback>), AppError> {
    let feedback = FeedbackService::create(&state.db, student.id(), dto).await?;

    info!(user_id = %student.id(), feedback_id = %feedback.id, "Feedback submitted");

    Ok((
        StatusCode::CREATED,
        ApiResponse::data(feedback).with_message("Thank you for your feedback"),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/feedback",
    params(FeedbackFilterParams),
    responses(
        (status = 200, description = "Feedback, newest first", body = [Feedback]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required")
    ),
    tag = "Admin: Feedback",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(filters): Query<FeedbackFilterParams>,
) -> Result<ApiResponse<Vec<Feedback>>, AppError> {
    let feedback = FeedbackService::list(&state.db, filters).await?;
    Ok(ApiResponse::list(feedback))
}

#[utoipa::path(
    delete,
    path = "/api/admin/feedback/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback ID")
    ),
    responses(
        (status = 200, description = "Feedback deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "Admin: Feedback",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    FeedbackService::delete(&state.db, id).await?;

    info!(admin_id = %admin.id(), feedback_id = %id, "Feedback deleted");

    Ok(ApiResponse::message("Feedback deleted"))
}
