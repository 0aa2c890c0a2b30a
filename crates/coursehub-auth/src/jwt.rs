//! Signing and verifying access tokens.
//!
//! Tokens are HS256 JWTs signed with `JwtConfig::secret`. Admin and student
//! tokens have separate lifetimes. Verification applies no clock leeway: a
//! token is rejected as soon as its `exp` has passed.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use coursehub_config::JwtConfig;
use coursehub_core::{AppError, GateError};

use crate::claims::{PrincipalKind, TokenClaims};

/// Issues a signed token for `principal_id`.
///
/// The lifetime is `admin_token_expiry` or `user_token_expiry` depending on
/// `kind`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn issue_token(
    principal_id: Uuid,
    kind: PrincipalKind,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let lifetime = match kind {
        PrincipalKind::Admin => jwt_config.admin_token_expiry,
        PrincipalKind::User => jwt_config.user_token_expiry,
    };

    let claims = TokenClaims {
        sub: principal_id,
        kind,
        iat: now,
        exp: now + lifetime,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the claims.
///
/// # Errors
///
/// - [`GateError::TokenExpired`] if `exp` is in the past
/// - [`GateError::TokenInvalid`] for a bad signature, a malformed token, or
///   claims that do not decode (unknown `type`, non-UUID `sub`)
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<TokenClaims, GateError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => GateError::TokenExpired,
        _ => GateError::TokenInvalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::with_secret("test-secret")
    }

    #[test]
    fn test_issue_and_verify_admin() {
        let id = Uuid::new_v4();
        let token = issue_token(id, PrincipalKind::Admin, &config()).unwrap();

        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.kind, PrincipalKind::Admin);
        assert_eq!(claims.exp - claims.iat, config().admin_token_expiry);
    }

    #[test]
    fn test_user_token_uses_user_lifetime() {
        let token = issue_token(Uuid::new_v4(), PrincipalKind::User, &config()).unwrap();

        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.kind, PrincipalKind::User);
        assert_eq!(claims.exp - claims.iat, config().user_token_expiry);
    }

    #[test]
    fn test_expired_token() {
        let mut expired = config();
        expired.user_token_expiry = -60;
        let token = issue_token(Uuid::new_v4(), PrincipalKind::User, &expired).unwrap();

        assert_eq!(verify_token(&token, &config()), Err(GateError::TokenExpired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue_token(Uuid::new_v4(), PrincipalKind::Admin, &config()).unwrap();

        assert_eq!(
            verify_token(&token, &JwtConfig::with_secret("other-secret")),
            Err(GateError::TokenInvalid)
        );
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(verify_token("not.a.jwt", &config()), Err(GateError::TokenInvalid));
        assert_eq!(verify_token("", &config()), Err(GateError::TokenInvalid));
    }

    #[test]
    fn test_foreign_claims_are_invalid() {
        #[derive(serde::Serialize)]
        struct Foreign {
            sub: String,
            r#type: String,
            exp: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Foreign {
                sub: Uuid::new_v4().to_string(),
                r#type: "instructor".to_string(),
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(verify_token(&token, &config()), Err(GateError::TokenInvalid));
    }
}
