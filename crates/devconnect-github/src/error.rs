//! Error types for repository lookups.

use thiserror::Error;

/// Errors that can occur while listing repositories.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The username cannot be a GitHub login.
    #[error("invalid GitHub username: {0}")]
    InvalidUsername(String),

    /// The HTTP request failed.
    #[error("network error: {0}")]
    Network(String),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}) for {username}")]
    Status { status: u16, username: String },

    /// The response body was not a repository list.
    #[error("invalid GitHub response: {0}")]
    Decode(String),
}

/// Result type for repository lookups.
pub type Result<T> = std::result::Result<T, GitHubError>;
