use axum::extract::{Path, Query, State};
use tracing::{info, instrument};
use uuid::Uuid;

use coursehub_auth::PrincipalKind;
use coursehub_core::{ApiResponse, AppError};
use coursehub_models::{Account, PaginatedUsersResponse, UpdateUserStatusDto, UserFilterParams};

use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "Paginated student accounts", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required")
    ),
    tag = "Admin: Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filters): Query<UserFilterParams>,
) -> Result<ApiResponse<PaginatedUsersResponse>, AppError> {
    let page = UserService::list(&state.db, filters).await?;
    Ok(ApiResponse::data(page))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Student account", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "User not found")
    ),
    tag = "Admin: Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Account>, AppError> {
    let user = UserService::get(&state.db, id).await?;
    Ok(ApiResponse::data(user))
}

/// Activate or deactivate a student
///
/// The change applies to the very next request: the student's cached
/// principal is dropped once the update commits.
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/status",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "Status updated", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "User not found")
    ),
    tag = "Admin: Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn update_user_status(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserStatusDto>,
) -> Result<ApiResponse<Account>, AppError> {
    let user = UserService::set_active(&state.db, id, dto.is_active).await?;
    state.gate.invalidate(PrincipalKind::User, id);

    info!(admin_id = %admin.id(), user_id = %id, is_active = dto.is_active, "User status changed");

    let message = if dto.is_active {
        "User activated"
    } else {
        "User deactivated"
    };
    Ok(ApiResponse::data(user).with_message(message))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin token required"),
        (status = 404, description = "User not found")
    ),
    tag = "Admin: Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    UserService::delete(&state.db, id).await?;
    state.gate.invalidate(PrincipalKind::User, id);

    info!(admin_id = %admin.id(), user_id = %id, "User deleted");

    Ok(ApiResponse::message("User deleted"))
}
