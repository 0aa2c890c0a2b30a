//! Token payload structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The two kinds of account that can hold a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Admin,
    /// A student account.
    User,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by every access token.
///
/// `sub` must be a UUID and `type` must be `"admin"` or `"user"`; a token
/// with anything else fails to decode and is treated as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenClaims {
    /// Principal id
    pub sub: Uuid,
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_type_tag() {
        let claims = TokenClaims {
            sub: Uuid::nil(),
            kind: PrincipalKind::Admin,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""type":"admin""#));
        assert!(serialized.contains(r#""sub":"00000000-0000-0000-0000-000000000000""#));
    }

    #[test]
    fn test_claims_deserialize_user() {
        let json = r#"{"sub":"6f1c9a52-3c1e-4a43-9a61-2f4f2f1b8e11","type":"user","iat":1,"exp":2}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.kind, PrincipalKind::User);
        assert_eq!(claims.exp, 2);
    }

    #[test]
    fn test_claims_reject_unknown_type() {
        let json = r#"{"sub":"6f1c9a52-3c1e-4a43-9a61-2f4f2f1b8e11","type":"instructor","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<TokenClaims>(json).is_err());
    }

    #[test]
    fn test_claims_reject_non_uuid_subject() {
        let json = r#"{"sub":"42","type":"user","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<TokenClaims>(json).is_err());
    }

    #[test]
    fn test_principal_kind_display() {
        assert_eq!(PrincipalKind::Admin.to_string(), "admin");
        assert_eq!(PrincipalKind::User.to_string(), "user");
    }
}
