use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    admin_external_login, admin_login, admin_me, external_login, login, me, register,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/external", post(external_login))
        .route("/me", get(me))
        .route("/admin/login", post(admin_login))
        .route("/admin/external", post(admin_external_login))
        .route("/admin/me", get(admin_me))
}
