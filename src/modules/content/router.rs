use axum::{
    Router,
    routing::{get, patch},
};

use coursehub_models::{
    Assignment, Exam, Lecture, Prerequisite, Resource, TeachingAssistant, Tutorial,
};

use crate::state::AppState;

use super::controller::{
    admin_create, admin_delete, admin_get, admin_list, admin_replace, admin_set_visibility,
    get_published, list_published,
};
use super::repository::ScopedContent;

fn public_routes<T: ScopedContent>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/courses/{{course_id}}/{}", T::COLLECTION),
            get(list_published::<T>),
        )
        .route(&format!("/{}/{{id}}", T::COLLECTION), get(get_published::<T>))
}

fn admin_routes<T: ScopedContent>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/courses/{{course_id}}/{}", T::COLLECTION),
            get(admin_list::<T>).post(admin_create::<T>),
        )
        .route(
            &format!("/{}/{{id}}", T::COLLECTION),
            get(admin_get::<T>)
                .put(admin_replace::<T>)
                .delete(admin_delete::<T>),
        )
        .route(
            &format!("/{}/{{id}}/visibility", T::COLLECTION),
            patch(admin_set_visibility::<T>),
        )
}

/// Read-only routes for visible content, mounted under `/api`.
pub fn init_public_content_router() -> Router<AppState> {
    Router::new()
        .merge(public_routes::<Lecture>())
        .merge(public_routes::<Assignment>())
        .merge(public_routes::<Tutorial>())
        .merge(public_routes::<Exam>())
        .merge(public_routes::<Prerequisite>())
        .merge(public_routes::<Resource>())
        .merge(public_routes::<TeachingAssistant>())
}

/// Full management routes, mounted under `/api/admin`.
pub fn init_admin_content_router() -> Router<AppState> {
    Router::new()
        .merge(admin_routes::<Lecture>())
        .merge(admin_routes::<Assignment>())
        .merge(admin_routes::<Tutorial>())
        .merge(admin_routes::<Exam>())
        .merge(admin_routes::<Prerequisite>())
        .merge(admin_routes::<Resource>())
        .merge(admin_routes::<TeachingAssistant>())
}
