//! # CourseHub CLI
//!
//! Administrator provisioning and demo data for CourseHub.
//!
//! Administrators cannot register through the API, so the first one (and
//! every later one) is created here.
//!
//! ## Usage
//!
//! ```ignore
//! use coursehub_cli::seeder::{SeedConfig, create_admin, seed_demo};
//!
//! create_admin(&pool, "Ada Lovelace", "ada@uni.edu", "correct horse").await?;
//! let summary = seed_demo(&pool, &SeedConfig::default()).await?;
//! ```

pub mod seeder;
