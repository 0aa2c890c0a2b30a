use chrono::{DateTime, Utc};
use coursehub_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub subject: String,
    pub message: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackDto {
    /// Course the feedback is about, if any; must exist
    pub course_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedbackFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let dto = CreateFeedbackDto {
            course_id: None,
            subject: "Pace".to_string(),
            message: "Lectures move a bit fast".to_string(),
            rating: Some(6),
        };
        assert!(dto.validate().is_err());

        let dto = CreateFeedbackDto {
            rating: None,
            ..dto
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_empty_message_rejected() {
        let dto = CreateFeedbackDto {
            course_id: None,
            subject: "Pace".to_string(),
            message: String::new(),
            rating: Some(3),
        };
        assert!(dto.validate().is_err());
    }
}
