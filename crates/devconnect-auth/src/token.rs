//! Bearer token issuance and verification.

use chrono::Utc;
use devconnect_types::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Token lifetime: 100 hours.
pub const TOKEN_TTL_SECS: u64 = 360_000;

/// Issues and verifies bearer tokens that identify a user.
pub trait TokenService: Send + Sync {
    /// Sign a token for `user_id`.
    fn issue(&self, user_id: UserId) -> Result<String>;

    /// Check a token and return the user it was issued for.
    fn verify(&self, token: &str) -> Result<UserId>;
}

/// User section of the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsUser {
    /// The user's identifier.
    pub id: UserId,
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    pub user: ClaimsUser,
    /// Issued at (seconds since the epoch).
    pub iat: u64,
    /// Expiry (seconds since the epoch).
    pub exp: u64,
}

/// HS256 JSON Web Tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Create a token service with the standard lifetime.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: TOKEN_TTL_SECS,
        }
    }

    fn issue_at(&self, user_id: UserId, issued_at: u64) -> Result<String> {
        let claims = Claims {
            user: ClaimsUser { id: user_id },
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))
    }
}

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> Result<String> {
        self.issue_at(user_id, unix_now())
    }

    fn verify(&self, token: &str) -> Result<UserId> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.user.id)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}
