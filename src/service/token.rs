//! Token Service
//!
//! Issues and verifies the short-lived bearer tokens of the
//! client-credentials flow. Verification is stateless: validity is computed
//! from the HS256 signature and the embedded expiry alone.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::models::auth::AccessTokenClaims;
use crate::utils::error::AppError;

/// Default token lifetime in minutes. Deliberately short: recipients are
/// expected to re-authenticate frequently.
pub const DEFAULT_TOKEN_EXPIRE_MINUTES: i64 = 2;

/// Why a token failed verification. The two cases map to different HTTP
/// outcomes: expired means re-authentication helps (401), malformed means it
/// does not (403).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed or its signature is invalid")]
    Malformed,
}

/// Stateless issuer and verifier of access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    token_lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            token_lifetime: Duration::minutes(DEFAULT_TOKEN_EXPIRE_MINUTES),
        }
    }

    /// Create a token service with a custom lifetime.
    pub fn with_lifetime(secret: String, token_lifetime: Duration) -> Self {
        Self {
            secret,
            token_lifetime,
        }
    }

    /// Issue a signed token binding `subject` to an absolute expiry.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessTokenClaims::new(subject, now + self.token_lifetime, now);

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify signature and expiry, returning the subject on success.
    ///
    /// Expiry is checked with zero leeway so the boundary is exact. A token
    /// whose signature does not verify is always `Malformed`, even if it
    /// would also be expired.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        match decode::<AccessTokenClaims>(token, &decoding_key, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Malformed),
            },
        }
    }
}
