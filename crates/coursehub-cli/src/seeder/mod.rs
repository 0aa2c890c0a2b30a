//! Seeding and provisioning.

mod admins;
mod courses;
mod models;

pub use admins::{MIN_PASSWORD_LENGTH, create_admin};
pub use courses::{generate_links, seed_demo};
pub use models::{DemoSummary, SeedConfig};
