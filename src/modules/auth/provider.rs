//! External identity providers.
//!
//! The provider itself is out of process: it checks a credential the client
//! obtained from it and hands back the profile it vouches for. Everything
//! after that, finding or creating the local account and issuing our own
//! token, happens in [`AuthService::login_external`](super::service::AuthService::login_external).

use std::fmt::Debug;

use async_trait::async_trait;

use coursehub_core::AppError;
use coursehub_models::VerifiedProfile;

#[async_trait]
pub trait IdentityProvider: Debug + Send + Sync {
    /// Checks `credential` with the provider. A rejected credential is a 401.
    async fn verify(&self, credential: &str) -> Result<VerifiedProfile, AppError>;
}
