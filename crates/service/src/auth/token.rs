use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::errors::AuthError;

/// Verified identity attached to a request. Built only from a token that
/// passed verification; immutable for the request's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub provider_enabled: bool,
    pub is_admin: bool,
}

/// Why a token failed verification. Logged server-side; the HTTP boundary
/// collapses all three kinds into 403.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("token malformed or signature invalid")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("token carries no usable subject claim")]
    MissingSubject,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default)]
    provider: bool,
    #[serde(default)]
    admin: bool,
    iat: i64,
    exp: i64,
}

/// Issues and verifies the signed bearer tokens (HS256). One instance per
/// process, keyed from configuration; rotating the secret invalidates all
/// outstanding tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a token carrying the subject and role claims.
    pub fn issue(
        &self,
        user_id: Uuid,
        provider_enabled: bool,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(user_id.to_string()),
            provider: provider_enabled,
            admin: is_admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and validate a token, yielding the principal it asserts.
    ///
    /// A decodable token without a subject UUID is a verification failure,
    /// not a degraded success.
    pub fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // no clock-skew allowance: past exp means expired
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                _ => VerifyError::Malformed,
            }
        })?;
        let user_id = data
            .claims
            .sub
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(VerifyError::MissingSubject)?;
        Ok(Principal {
            user_id,
            provider_enabled: data.claims.provider,
            is_admin: data.claims.admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", Duration::hours(12))
    }

    #[test]
    fn issue_then_verify_roundtrips_claims() {
        let codec = codec();
        let id = Uuid::new_v4();
        let token = codec.issue(id, true, false).unwrap();
        let principal = codec.verify(&token).unwrap();
        assert_eq!(principal.user_id, id);
        assert!(principal.provider_enabled);
        assert!(!principal.is_admin);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let stale = TokenCodec::new("test-secret", Duration::seconds(-60));
        let token = stale.issue(Uuid::new_v4(), false, false).unwrap();
        assert_eq!(codec().verify(&token), Err(VerifyError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().verify("not-a-token"), Err(VerifyError::Malformed));
        assert_eq!(codec().verify(""), Err(VerifyError::Malformed));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let other = TokenCodec::new("other-secret", Duration::hours(1));
        let token = other.issue(Uuid::new_v4(), false, true).unwrap();
        assert_eq!(codec().verify(&token), Err(VerifyError::Malformed));
    }

    #[test]
    fn token_without_subject_is_rejected() {
        #[derive(Serialize)]
        struct NoSub {
            provider: bool,
            admin: bool,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now();
        let claims = NoSub {
            provider: false,
            admin: true,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();
        assert_eq!(codec().verify(&token), Err(VerifyError::MissingSubject));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        #[derive(Serialize)]
        struct BadSub {
            sub: String,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now();
        let claims = BadSub {
            sub: "not-a-uuid".into(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();
        assert_eq!(codec().verify(&token), Err(VerifyError::MissingSubject));
    }
}
