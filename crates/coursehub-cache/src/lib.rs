//! # CourseHub Cache
//!
//! Process-local caching for the CourseHub API.
//!
//! This crate provides:
//! - [`TtlCache`]: a concurrent map whose entries expire a fixed time after insertion
//! - [`FillTicket`]: guards cache fills against a concurrent invalidation
//! - [`spawn_sweeper`]: a background task that evicts expired entries
//! - [`CacheConfig`]: TTL and sweep interval from environment variables
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coursehub_cache::{CacheConfig, TtlCache, spawn_sweeper};
//!
//! let config = CacheConfig::from_env();
//! let cache = Arc::new(TtlCache::new(config.ttl));
//! let _sweeper = spawn_sweeper(Arc::clone(&cache), config.sweep_interval);
//!
//! let ticket = cache.fill_ticket();
//! let value = load_from_store(key).await?;
//! cache.insert_if_current(key, value, ticket);
//! ```

pub mod config;
pub mod sweeper;
pub mod ttl;

pub use config::CacheConfig;
pub use sweeper::spawn_sweeper;
pub use ttl::{FillTicket, TtlCache};
