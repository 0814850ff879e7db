//! Error types for the auth crate.

use devconnect_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A user with this email is already registered.
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is malformed, has a bad signature, or has expired.
    #[error("invalid token")]
    InvalidToken,

    /// The token could not be signed.
    #[error("token signing failed: {0}")]
    TokenSigning(String),

    /// Password hashing failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
