use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::content::Link;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub assignment_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_points: i32,
    #[sqlx(json)]
    pub attachments: Vec<Link>,
    pub related_lecture_ids: Vec<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_total_points() -> i32 {
    100
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignmentInput {
    #[validate(range(min = 1))]
    pub assignment_number: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default = "default_total_points")]
    #[validate(range(min = 0))]
    pub total_points: i32,
    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<Link>,
    #[serde(default)]
    pub related_lecture_ids: Vec<Uuid>,
    #[serde(default)]
    pub is_published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_input_defaults_points() {
        let input: AssignmentInput = serde_json::from_str(
            r#"{"assignment_number":1,"title":"HW1","due_date":"2026-02-01T23:59:00Z"}"#,
        )
        .unwrap();
        assert_eq!(input.total_points, 100);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_assignment_input_rejects_negative_points() {
        let input: AssignmentInput = serde_json::from_str(
            r#"{"assignment_number":1,"title":"HW1","due_date":"2026-02-01T23:59:00Z","total_points":-5}"#,
        )
        .unwrap();
        assert!(input.validate().is_err());
    }
}
