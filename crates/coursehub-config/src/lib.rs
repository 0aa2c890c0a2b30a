//! # CourseHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and per-principal token lifetimes
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen ports
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
