//! # CourseHub Core
//!
//! Core types, errors, and utilities for the CourseHub API.
//!
//! - [`errors`]: Application and gate error types with HTTP response conversion
//! - [`response`]: The JSON envelope every endpoint answers with
//! - [`pagination`]: Pagination parameters for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Query-string deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::errors::AppError;
//! use coursehub_core::response::ApiResponse;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let body = ApiResponse::data(course).with_message("Course created");
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;
pub mod serde;

pub use errors::{AppError, GateError};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
