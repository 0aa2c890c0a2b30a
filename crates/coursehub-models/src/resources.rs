use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An external resource. Unlike other content its visibility flag is
/// `is_active`, and new resources are visible unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub url: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResourceInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_input_defaults() {
        let input: ResourceInput =
            serde_json::from_str(r#"{"title":"Rust book","url":"https://doc.rust-lang.org/book/"}"#)
                .unwrap();
        assert_eq!(input.category, "general");
        assert!(input.is_active);
        assert!(input.validate().is_ok());
    }
}
