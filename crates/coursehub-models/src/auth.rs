use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::principals::{Account, Principal};
use coursehub_auth::PrincipalKind;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Opaque credential issued by the external identity provider.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExternalLoginRequest {
    #[validate(length(min = 1, max = 4096))]
    pub credential: String,
}

/// Profile the identity provider vouches for after checking a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedProfile {
    /// Stable subject identifier at the provider
    pub external_id: String,
    pub email: String,
    pub name: String,
}

/// Token plus the signed-in account, under `user` or `admin` by kind.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<Account>,
}

impl AuthResponse {
    pub fn new(token: String, principal: Principal) -> Self {
        match principal.kind {
            PrincipalKind::Admin => Self {
                token,
                user: None,
                admin: Some(principal.account),
            },
            PrincipalKind::User => Self {
                token,
                user: Some(principal.account),
                admin: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Grace".to_string(),
            email: "grace@uni.edu".to_string(),
            password: "longenough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_external_login_request_requires_credential() {
        let request = ExternalLoginRequest {
            credential: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_rejects_bad_email() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "whatever".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
