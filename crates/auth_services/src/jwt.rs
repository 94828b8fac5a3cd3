use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::types::{AuthError, Claims, User};

/// Reasons a bearer token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// The token could not be parsed or decoded
    #[error("malformed token")]
    Malformed,
    /// The signature does not match the signing secret
    #[error("bad signature")]
    BadSignature,
    /// The current time is at or past the token expiry
    #[error("token expired")]
    Expired,
}

/// Issues and verifies HS256 session tokens.
///
/// The signing secret is supplied once at construction and never rotated.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    /// Creates a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Lifetime of newly issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues an access token for `user`, valid from now for the configured ttl.
    pub fn generate_access_token(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    /// Issues an access token as if the current time were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verifies a token against the signing secret and the current time.
    pub fn verify_token(&self, token: &str) -> Result<Claims, VerificationError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, VerificationError> {
        // Expiry is checked here rather than by jsonwebtoken so that `now` is
        // injectable and the boundary is exact (no leeway).
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        VerificationError::BadSignature
                    }
                    _ => VerificationError::Malformed,
                }
            })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(VerificationError::Expired);
        }

        Ok(token_data.claims)
    }
}
