pub mod auth;
pub mod content;
pub mod courses;
pub mod feedback;
pub mod users;
