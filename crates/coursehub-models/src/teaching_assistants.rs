use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeachingAssistant {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub email: String,
    pub office_hours: Option<String>,
    pub office_location: Option<String>,
    pub bio: Option<String>,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeachingAssistantInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub office_hours: Option<String>,
    #[validate(length(max = 200))]
    pub office_location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_published: bool,
}
