//! Lookup of a developer's public GitHub repositories.
//!
//! Profiles may name a GitHub account; the API shows that account's most
//! recently created repositories next to the profile. [`RepoLookup`] is the
//! seam the HTTP layer depends on and [`GitHubClient`] the production
//! implementation.

mod client;
mod error;

pub use client::{GitHubClient, DEFAULT_API_URL, REPO_LIMIT};
pub use error::{GitHubError, Result};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a public repository.
///
/// Fields the upstream API returns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Source of repository listings for a username.
#[async_trait]
pub trait RepoLookup: Send + Sync {
    /// Lists a user's public repositories.
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoSummary>>;
}
