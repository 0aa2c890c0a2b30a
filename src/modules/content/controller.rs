//! Handlers shared by every content type.
//!
//! Each handler is generic over [`ScopedContent`] and is instantiated once per
//! type in the router, so `GET /api/courses/{course_id}/lectures` and
//! `GET /api/courses/{course_id}/exams` run the same code.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use coursehub_core::{ApiResponse, AppError};
use coursehub_models::VisibilityDto;

use crate::metrics::track_content_created;
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::repository::{ContentRepository, ScopedContent};

// Public

#[instrument(skip(state), fields(content = T::LABEL))]
pub async fn list_published<T: ScopedContent>(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<T>>, AppError> {
    let items = ContentRepository::<T>::list_visible(&state.db, course_id).await?;
    Ok(ApiResponse::list(items))
}

#[instrument(skip(state), fields(content = T::LABEL))]
pub async fn get_published<T: ScopedContent>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<T>, AppError> {
    let item = ContentRepository::<T>::get_visible(&state.db, id).await?;
    Ok(ApiResponse::data(item))
}

// Admin

#[instrument(skip(state), fields(content = T::LABEL))]
pub async fn admin_list<T: ScopedContent>(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<T>>, AppError> {
    let items = ContentRepository::<T>::list_all(&state.db, course_id).await?;
    Ok(ApiResponse::list(items))
}

#[instrument(skip(state), fields(content = T::LABEL))]
pub async fn admin_get<T: ScopedContent>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<T>, AppError> {
    let item = ContentRepository::<T>::get(&state.db, id).await?;
    Ok(ApiResponse::data(item))
}

#[instrument(skip(state, admin, input), fields(content = T::LABEL))]
pub async fn admin_create<T: ScopedContent>(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(course_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<T::Input>,
) -> Result<(StatusCode, ApiResponse<T>), AppError> {
    let item = ContentRepository::<T>::create(&state.db, course_id, input).await?;

    track_content_created(T::LABEL);
    info!(admin_id = %admin.id(), course_id = %course_id, "{} created", T::LABEL);

    Ok((
        StatusCode::CREATED,
        ApiResponse::data(item).with_message(format!("{} created", T::LABEL)),
    ))
}

#[instrument(skip(state, admin, input), fields(content = T::LABEL))]
pub async fn admin_replace<T: ScopedContent>(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<T::Input>,
) -> Result<ApiResponse<T>, AppError> {
    let item = ContentRepository::<T>::replace(&state.db, id, input).await?;

    info!(admin_id = %admin.id(), "{} updated", T::LABEL);

    Ok(ApiResponse::data(item).with_message(format!("{} updated", T::LABEL)))
}

#[instrument(skip(state, admin), fields(content = T::LABEL))]
pub async fn admin_set_visibility<T: ScopedContent>(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<VisibilityDto>,
) -> Result<ApiResponse<T>, AppError> {
    let item = ContentRepository::<T>::set_visibility(&state.db, id, dto.visible).await?;

    info!(admin_id = %admin.id(), visible = dto.visible, "{} visibility changed", T::LABEL);

    let message = if dto.visible {
        format!("{} is now visible", T::LABEL)
    } else {
        format!("{} is now hidden", T::LABEL)
    };
    Ok(ApiResponse::data(item).with_message(message))
}

#[instrument(skip(state, admin), fields(content = T::LABEL))]
pub async fn admin_delete<T: ScopedContent>(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    ContentRepository::<T>::delete(&state.db, id).await?;

    info!(admin_id = %admin.id(), "{} deleted", T::LABEL);

    Ok(ApiResponse::message(format!("{} deleted", T::LABEL)))
}
