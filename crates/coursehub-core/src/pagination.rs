//! Pagination for admin list endpoints.
//!
//! Clients send `limit` with either `offset` or a 1-indexed `page`; when
//! both are present `page` wins. Empty query values count as absent.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching rows
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            page: params.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Items per page (1-100, default 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Items to skip, ignored when `page` is set
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// 1-indexed page number
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}
