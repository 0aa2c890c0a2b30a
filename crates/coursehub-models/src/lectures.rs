//! Lectures.
//!
//! A lecture is identified within its course by `lecture_number`, which is
//! also the listing order. Students only ever see lectures with
//! `is_published = true`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::content::Link;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lecture {
    pub id: Uuid,
    pub course_id: Uuid,
    pub lecture_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub lecture_date: Option<NaiveDate>,
    #[sqlx(json)]
    pub videos: Vec<Link>,
    #[sqlx(json)]
    pub slides: Vec<Link>,
    #[sqlx(json)]
    pub reading_materials: Vec<Link>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a lecture.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LectureInput {
    /// Position within the course, unique per course
    #[validate(range(min = 1))]
    pub lecture_number: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub lecture_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub videos: Vec<Link>,
    #[serde(default)]
    #[validate(nested)]
    pub slides: Vec<Link>,
    #[serde(default)]
    #[validate(nested)]
    pub reading_materials: Vec<Link>,
    #[serde(default)]
    pub is_published: bool,
}
