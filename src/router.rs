use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use coursehub_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::{require_admin, require_student};
use crate::modules::auth::router::init_auth_router;
use crate::modules::content::router::{init_admin_content_router, init_public_content_router};
use crate::modules::courses::router::{init_admin_courses_router, init_courses_router};
use crate::modules::feedback::router::{init_admin_feedback_router, init_feedback_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    // Everything under /api/admin sits behind the admin gate
    let admin_routes = Router::new()
        .merge(init_admin_courses_router())
        .merge(init_admin_content_router())
        .nest("/users", init_users_router())
        .nest("/feedback", init_admin_feedback_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .merge(init_courses_router())
                .merge(init_public_content_router())
                .nest(
                    "/feedback",
                    init_feedback_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_student,
                    )),
                )
                .nest("/admin", admin_routes),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
