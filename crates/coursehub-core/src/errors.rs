//! Error types shared by every handler.
//!
//! [`GateError`] is the closed set of reasons the authentication gate can
//! refuse a request. [`AppError`] is the general handler error; it carries a
//! status code and an [`anyhow::Error`], and converts from a `GateError`
//! without losing the gate's status.

use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ApiResponse;

/// Message returned to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Reasons the authentication gate rejects a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Not authorized, no token provided")]
    Unauthenticated,

    #[error("Token has expired, please log in again")]
    TokenExpired,

    #[error("Not authorized, token is invalid")]
    TokenInvalid,

    #[error("Access denied: {expected} account required")]
    WrongPrincipalType { expected: &'static str },

    #[error("Account not found")]
    PrincipalNotFound,

    #[error("Account has been deactivated")]
    PrincipalDeactivated,

    #[error("Principal store unavailable")]
    StoreUnavailable,
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::WrongPrincipalType { .. } | Self::PrincipalDeactivated => StatusCode::FORBIDDEN,
            Self::PrincipalNotFound => StatusCode::NOT_FOUND,
            Self::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::TokenExpired => "token_expired",
            Self::TokenInvalid => "token_invalid",
            Self::WrongPrincipalType { .. } => "wrong_principal_type",
            Self::PrincipalNotFound => "principal_not_found",
            Self::PrincipalDeactivated => "principal_deactivated",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    /// Returns the gate rejection this error was built from, if any.
    pub fn gate_error(&self) -> Option<&GateError> {
        self.error.downcast_ref::<GateError>()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                error = ?self.error,
                "Request failed with server error"
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        };

        (self.status, ApiResponse::<()>::error(message)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = error
            .downcast_ref::<GateError>()
            .map(GateError::status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self { status, error }
    }
}
