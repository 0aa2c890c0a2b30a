use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    /// Catalogue code, unique across courses (e.g. `CS101`)
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub instructor: Option<String>,
    /// Inactive courses are hidden from public listings
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Body for both creating and replacing a course.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CourseInput {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub semester: Option<String>,
    #[validate(length(max = 100))]
    pub instructor: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
