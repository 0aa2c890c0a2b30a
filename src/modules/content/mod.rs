pub mod controller;
pub mod entities;
pub mod repository;
pub mod router;

pub use repository::{ContentRepository, ScopedContent};
