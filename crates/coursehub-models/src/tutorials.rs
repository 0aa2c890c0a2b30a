use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::content::Link;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tutorial {
    pub id: Uuid,
    pub course_id: Uuid,
    pub tutorial_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub tutorial_date: Option<NaiveDate>,
    #[sqlx(json)]
    pub materials: Vec<Link>,
    pub related_lecture_ids: Vec<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TutorialInput {
    #[validate(range(min = 1))]
    pub tutorial_number: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub tutorial_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub materials: Vec<Link>,
    #[serde(default)]
    pub related_lecture_ids: Vec<Uuid>,
    #[serde(default)]
    pub is_published: bool,
}
