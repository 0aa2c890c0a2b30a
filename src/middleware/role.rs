//! Route layers that put a whole router behind the gate.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/courses", get(list_courses))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```
//!
//! The resolved [`Principal`] is stored in the request extensions, where the
//! [`AuthAdmin`](crate::middleware::auth::AuthAdmin) and
//! [`AuthStudent`](crate::middleware::auth::AuthStudent) extractors pick it
//! up without a second lookup.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use coursehub_auth::PrincipalKind;
use coursehub_core::AppError;
use coursehub_models::Principal;

use crate::state::AppState;

async fn require_kind(
    state: &AppState,
    req: Request,
    next: Next,
    kind: PrincipalKind,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let principal: Principal = state.gate.authenticate(&parts.headers, kind).await?;
    parts.extensions.insert(principal);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_kind(&state, req, next, PrincipalKind::Admin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_kind(&state, req, next, PrincipalKind::User).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
