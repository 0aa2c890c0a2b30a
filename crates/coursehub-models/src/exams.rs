use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An exam, listed in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// Free-form kind such as `midterm`, `final` or `quiz`
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub topics: Vec<String>,
    pub related_lecture_ids: Vec<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExamInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub related_lecture_ids: Vec<Uuid>,
    #[serde(default)]
    pub is_published: bool,
}
