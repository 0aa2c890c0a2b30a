//! # CourseHub Auth
//!
//! Token issuing and verification for the CourseHub API.
//!
//! Two kinds of principal sign in: administrators and students. Each gets a
//! signed token whose `type` claim records the kind, so an admin token can
//! never pass a student-only check and vice versa.
//!
//! - [`claims`]: [`PrincipalKind`] and the [`TokenClaims`] payload
//! - [`jwt`]: [`issue_token`] and [`verify_token`]
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{PrincipalKind, issue_token, verify_token};
//! use coursehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(admin_id, PrincipalKind::Admin, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.kind, PrincipalKind::Admin);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{PrincipalKind, TokenClaims};
pub use jwt::{issue_token, verify_token};
