//! Pieces shared by the course-scoped content types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A titled link to a video, slide deck, reading or attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Link {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub url: String,
}

/// Body of the admin visibility toggle.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct VisibilityDto {
    pub visible: bool,
}
