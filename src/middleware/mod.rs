//! Request authentication.
//!
//! # Modules
//!
//! - [`auth`]: the [`PrincipalGate`](auth::PrincipalGate) and the
//!   `AuthAdmin` / `AuthStudent` extractors
//! - [`role`]: route layers requiring an admin or a student
//! - [`store`]: the principal store the gate falls back to on a cache miss
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The gate verifies the token and checks its principal kind
//! 3. The principal is resolved from the cache or the store and must be active
//! 4. The handler receives it through an extractor

pub mod auth;
pub mod role;
pub mod store;
