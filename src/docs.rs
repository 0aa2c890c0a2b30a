use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursehub_core::{PaginationMeta, PaginationParams};
use coursehub_models::{
    Account, Assignment, AssignmentInput, AuthResponse, Course, CourseInput, CreateFeedbackDto,
    Exam, ExamInput, ExternalLoginRequest, Feedback, Lecture, LectureInput, Link, LoginRequest,
    PaginatedUsersResponse, Prerequisite, PrerequisiteInput, Principal, PrincipalKind, RegisterRequest, Resource,
    ResourceInput, TeachingAssistant, TeachingAssistantInput, Tutorial, TutorialInput,
    UpdateUserStatusDto, VisibilityDto,
};

/// Content routes are generic and registered per type, so only their
/// schemas are listed here.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::admin_login,
        crate::modules::auth::controller::external_login,
        crate::modules::auth::controller::admin_external_login,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::admin_me,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::admin_list_courses,
        crate::modules::courses::controller::admin_create_course,
        crate::modules::courses::controller::admin_get_course,
        crate::modules::courses::controller::admin_update_course,
        crate::modules::courses::controller::admin_delete_course,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user_status,
        crate::modules::users::controller::delete_user,
        crate::modules::feedback::controller::submit_feedback,
        crate::modules::feedback::controller::list_feedback,
        crate::modules::feedback::controller::delete_feedback,
    ),
    components(
        schemas(
            Account,
            Principal,
            PrincipalKind,
            RegisterRequest,
            LoginRequest,
            ExternalLoginRequest,
            AuthResponse,
            Course,
            CourseInput,
            Link,
            VisibilityDto,
            Lecture,
            LectureInput,
            Assignment,
            AssignmentInput,
            Tutorial,
            TutorialInput,
            Exam,
            ExamInput,
            Prerequisite,
            PrerequisiteInput,
            Resource,
            ResourceInput,
            TeachingAssistant,
            TeachingAssistantInput,
            Feedback,
            CreateFeedbackDto,
            UpdateUserStatusDto,
            PaginatedUsersResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Student and administrator sign-in"),
        (name = "Courses", description = "Public course catalogue"),
        (name = "Admin: Courses", description = "Course management"),
        (name = "Admin: Users", description = "Student account management"),
        (name = "Feedback", description = "Student feedback"),
        (name = "Admin: Feedback", description = "Feedback review")
    ),
    info(
        title = "CourseHub API",
        version = "0.1.0",
        description = "Course content for students, with an administrator back office. Every response uses the `{success, message?, data?, count?}` envelope.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gated_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/admin/users/{id}/status"));
        assert!(doc.paths.paths.contains_key("/api/auth/admin/login"));
        assert!(doc.paths.paths.contains_key("/api/auth/external"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
