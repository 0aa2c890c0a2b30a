//! # CourseHub Models
//!
//! Database entities, request/response DTOs, and validation schemas for the
//! CourseHub API.
//!
//! # Modules
//!
//! - [`principals`]: administrator and student accounts
//! - [`auth`]: registration, login and external sign-in payloads
//! - [`courses`]: courses
//! - [`content`]: shared pieces of course content (links, visibility toggle)
//! - [`lectures`], [`assignments`], [`tutorials`], [`exams`],
//!   [`prerequisites`], [`resources`], [`teaching_assistants`]: the
//!   course-scoped content types
//! - [`feedback`]: student feedback
//! - [`users`]: admin-side student management

pub mod assignments;
pub mod auth;
pub mod content;
pub mod courses;
pub mod exams;
pub mod feedback;
pub mod lectures;
pub mod prerequisites;
pub mod principals;
pub mod resources;
pub mod teaching_assistants;
pub mod tutorials;
pub mod users;

pub use assignments::{Assignment, AssignmentInput};
pub use auth::{
    AuthResponse, ExternalLoginRequest, LoginRequest, RegisterRequest, VerifiedProfile,
};
pub use content::{Link, VisibilityDto};
pub use courses::{Course, CourseInput};
pub use exams::{Exam, ExamInput};
pub use feedback::{CreateFeedbackDto, Feedback, FeedbackFilterParams};
pub use lectures::{Lecture, LectureInput};
pub use prerequisites::{Prerequisite, PrerequisiteInput};
pub use principals::{ACCOUNT_COLUMNS, Account, AccountCredentials, Principal};
pub use resources::{Resource, ResourceInput};
pub use teaching_assistants::{TeachingAssistant, TeachingAssistantInput};
pub use tutorials::{Tutorial, TutorialInput};
pub use users::{PaginatedUsersResponse, UpdateUserStatusDto, UserFilterParams};

pub use coursehub_auth::PrincipalKind;
