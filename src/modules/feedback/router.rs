use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{delete_feedback, list_feedback, submit_feedback};

pub fn init_feedback_router() -> Router<AppState> {
    Router::new().route("/", post(submit_feedback))
}

pub fn init_admin_feedback_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback))
        .route("/{id}", delete(delete_feedback))
}
