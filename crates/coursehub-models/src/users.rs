//! Admin-side student management.

use coursehub_core::serde::deserialize_optional_bool;
use coursehub_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::principals::Account;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct UpdateUserStatusDto {
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub users: Vec<Account>,
    pub meta: PaginationMeta,
}
