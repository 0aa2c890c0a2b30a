//! The authenticated request gate.
//!
//! [`PrincipalGate`] turns a bearer token into a live [`Principal`]:
//!
//! 1. read `Authorization: Bearer <token>`
//! 2. verify signature and expiry
//! 3. check the token's principal kind against the route
//! 4. resolve the principal through a TTL cache, falling back to the store
//!
//! Only active principals are cached. Write paths that change a principal's
//! status call [`PrincipalGate::invalidate`] after their commit, so a
//! deactivated account is refused on its next request instead of after the
//! TTL runs out.
//!
//! The cache is per process. Invalidation does not reach other instances,
//! which keep serving their cached snapshot until it expires. Concurrent
//! misses for the same principal each read the store.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use coursehub_auth::{PrincipalKind, verify_token};
use coursehub_cache::{CacheConfig, TtlCache, spawn_sweeper};
use coursehub_config::JwtConfig;
use coursehub_core::{AppError, GateError};
use coursehub_models::Principal;

use crate::metrics::{track_cache_invalidation, track_cache_lookup, track_gate_rejection};
use crate::middleware::store::PrincipalStore;
use crate::state::AppState;

/// Principals of different kinds may share an id, so both form the key.
pub type PrincipalKey = (PrincipalKind, Uuid);

pub struct PrincipalGate {
    store: Arc<dyn PrincipalStore>,
    cache: Arc<TtlCache<PrincipalKey, Principal>>,
    jwt_config: JwtConfig,
    sweep_interval: Duration,
}

impl fmt::Debug for PrincipalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalGate")
            .field("ttl", &self.cache.ttl())
            .field("sweep_interval", &self.sweep_interval)
            .finish_non_exhaustive()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(GateError::Unauthenticated)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(GateError::Unauthenticated)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(GateError::Unauthenticated);
    }

    Ok(token)
}

impl PrincipalGate {
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        jwt_config: JwtConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            store,
            cache: Arc::new(TtlCache::new(cache_config.ttl)),
            jwt_config,
            sweep_interval: cache_config.sweep_interval,
        }
    }

    /// Starts the periodic eviction of expired cache entries.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(Arc::clone(&self.cache), self.sweep_interval)
    }

    /// Runs the full gate for a route that requires a principal of `expected` kind.
    #[instrument(skip_all, fields(expected = %expected))]
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        expected: PrincipalKind,
    ) -> Result<Principal, GateError> {
        let result = self.check(headers, expected).await;

        if let Err(e) = &result {
            track_gate_rejection(e);
            debug!(reason = e.reason(), "Request rejected by gate");
        }

        result
    }

    async fn check(
        &self,
        headers: &HeaderMap,
        expected: PrincipalKind,
    ) -> Result<Principal, GateError> {
        let token = bearer_token(headers)?;
        let claims = verify_token(token, &self.jwt_config)?;

        if claims.kind != expected {
            return Err(GateError::WrongPrincipalType {
                expected: expected.as_str(),
            });
        }

        self.resolve(claims.kind, claims.sub).await
    }

    /// Resolves a principal from the cache or, on a miss, from the store.
    pub async fn resolve(&self, kind: PrincipalKind, id: Uuid) -> Result<Principal, GateError> {
        let key = (kind, id);

        if let Some(principal) = self.cache.get(&key) {
            track_cache_lookup(true);
            return Ok(principal);
        }
        track_cache_lookup(false);

        let ticket = self.cache.fill_ticket();
        let principal = self
            .store
            .find_principal(kind, id)
            .await
            .map_err(|e| {
                error!(
                    operation = "find_principal",
                    principal_id = %id,
                    kind = %kind,
                    error = %e,
                    "Principal store unavailable"
                );
                GateError::StoreUnavailable
            })?
            .ok_or(GateError::PrincipalNotFound)?;

        if !principal.is_active() {
            return Err(GateError::PrincipalDeactivated);
        }

        self.cache.insert_if_current(key, principal.clone(), ticket);
        Ok(principal)
    }

    /// Drops any cached snapshot of the principal. Call after the store
    /// write that changed it has committed.
    pub fn invalidate(&self, kind: PrincipalKind, id: Uuid) {
        let removed = self.cache.invalidate(&(kind, id));
        track_cache_invalidation();
        debug!(principal_id = %id, kind = %kind, removed, "Invalidated cached principal");
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

macro_rules! principal_extractor {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub Principal);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                // Already resolved by a route layer
                if let Some(principal) = parts.extensions.get::<Principal>()
                    && principal.kind == $kind
                {
                    return Ok(Self(principal.clone()));
                }

                let principal = state.gate.authenticate(&parts.headers, $kind).await?;
                parts.extensions.insert(principal.clone());

                Ok(Self(principal))
            }
        }
    };
}

principal_extractor!(
    /// An authenticated, active administrator.
    AuthAdmin,
    PrincipalKind::Admin
);
principal_extractor!(
    /// An authenticated, active student.
    AuthStudent,
    PrincipalKind::User
);
