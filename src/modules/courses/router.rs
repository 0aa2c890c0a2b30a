use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    admin_create_course, admin_delete_course, admin_get_course, admin_list_courses,
    admin_update_course, get_course, list_courses,
};

/// Merged with the public content routes, which share the `/courses` prefix.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", get(get_course))
}

pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(admin_list_courses).post(admin_create_course))
        .route(
            "/courses/{course_id}",
            get(admin_get_course)
                .put(admin_update_course)
                .delete(admin_delete_course),
        )
}
