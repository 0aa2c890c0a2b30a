use axum::{extract::State, http::StatusCode};
use anyhow::anyhow;
use tracing::instrument;

use coursehub_auth::PrincipalKind;
use coursehub_core::{ApiResponse, AppError};
use coursehub_models::{
    AuthResponse, ExternalLoginRequest, LoginRequest, Principal, RegisterRequest,
};

use crate::middleware::auth::{AuthAdmin, AuthStudent};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new student account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered and signed in", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AuthResponse>), AppError> {
    let response = AuthService::register_student(&state.db, dto, &state.jwt_config).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(response).with_message("Registration successful"),
    ))
}

/// Student login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = AuthService::login(&state.db, PrincipalKind::User, dto, &state.jwt_config).await?;
    Ok(ApiResponse::data(response).with_message("Login successful"))
}

/// Administrator login
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response =
        AuthService::login(&state.db, PrincipalKind::Admin, dto, &state.jwt_config).await?;
    Ok(ApiResponse::data(response).with_message("Login successful"))
}

async fn external_login_as(
    state: &AppState,
    kind: PrincipalKind,
    dto: ExternalLoginRequest,
) -> Result<AuthResponse, AppError> {
    let Some(provider) = state.identity_provider.as_ref() else {
        return Err(AppError::bad_request(anyhow!("External sign-in is not configured")));
    };

    let profile = provider.verify(&dto.credential).await?;
    AuthService::login_external(&state.db, kind, profile, &state.jwt_config).await
}

/// Student sign-in through the external identity provider
///
/// Creates the student account on first sign-in.
#[utoipa::path(
    post,
    path = "/api/auth/external",
    request_body = ExternalLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error, email taken, or external sign-in not configured"),
        (status = 401, description = "Credential rejected by the provider"),
        (status = 403, description = "Account deactivated")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn external_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ExternalLoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = external_login_as(&state, PrincipalKind::User, dto).await?;
    Ok(ApiResponse::data(response).with_message("Login successful"))
}

/// Administrator sign-in through the external identity provider
///
/// The identity must already be linked to an administrator.
#[utoipa::path(
    post,
    path = "/api/auth/admin/external",
    request_body = ExternalLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error or external sign-in not configured"),
        (status = 401, description = "Credential rejected or identity not linked"),
        (status = 403, description = "Account deactivated")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn admin_external_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ExternalLoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = external_login_as(&state, PrincipalKind::Admin, dto).await?;
    Ok(ApiResponse::data(response).with_message("Login successful"))
}

/// The signed-in student
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current student", body = Principal),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Not a student token, or account deactivated")
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn me(AuthStudent(student): AuthStudent) -> ApiResponse<Principal> {
    ApiResponse::data(student)
}

/// The signed-in administrator
#[utoipa::path(
    get,
    path = "/api/auth/admin/me",
    responses(
        (status = 200, description = "Current administrator", body = Principal),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Not an admin token, or account deactivated")
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn admin_me(AuthAdmin(admin): AuthAdmin) -> ApiResponse<Principal> {
    ApiResponse::data(admin)
}
