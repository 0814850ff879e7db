//! GitHub REST client.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{GitHubError, Result};
use crate::{RepoLookup, RepoSummary};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Number of repositories returned per lookup.
pub const REPO_LIMIT: usize = 5;

const USER_AGENT: &str = "devconnect";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Lists repositories through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for `base_url`, authenticating with `token` when given.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Create a client for the public GitHub API.
    pub fn public(token: Option<String>) -> Result<Self> {
        Self::new(DEFAULT_API_URL, token)
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page={}&sort=created:asc",
            self.base_url, username, REPO_LIMIT
        )
    }
}

/// GitHub logins are alphanumerics and single hyphens, at most 39 characters.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[async_trait]
impl RepoLookup for GitHubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoSummary>> {
        let username = username.trim();
        if !is_valid_username(username) {
            return Err(GitHubError::InvalidUsername(username.to_string()));
        }

        let url = self.repos_url(username);
        debug!(%url, "Fetching GitHub repositories");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(username, status = status.as_u16(), "GitHub lookup failed");
            return Err(GitHubError::Status {
                status: status.as_u16(),
                username: username.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| GitHubError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "name": name,
            "full_name": format!("alice/{name}"),
            "html_url": format!("https://github.com/alice/{name}"),
            "description": null,
            "language": "Rust",
            "stargazers_count": 3,
            "watchers_count": 3,
            "forks_count": 1,
            "created_at": "2020-01-01T00:00:00Z",
            "private": false
        })
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice-dev42"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("-alice"));
        assert!(!is_valid_username("../orgs"));
        assert!(!is_valid_username("alice?x=1"));
        assert!(!is_valid_username(&"a".repeat(40)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GitHubClient::new("http://localhost:1/", None).unwrap();
        assert_eq!(
            client.repos_url("alice"),
            "http://localhost:1/users/alice/repos?per_page=5&sort=created:asc"
        );
    }

    #[tokio::test]
    async fn test_list_repos_sends_query_and_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/alice/repos"))
            .and(query_param("per_page", "5"))
            .and(query_param("sort", "created:asc"))
            .and(header("Authorization", "token secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([repo_json("one"), repo_json("two")])),
            )
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(mock_server.uri(), Some("secret".into())).unwrap();
        let repos = client.list_repos("alice").await.unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].full_name, "alice/one");
        assert_eq!(repos[0].language.as_deref(), Some("Rust"));
        assert_eq!(repos[1].stargazers_count, 3);
    }

    #[tokio::test]
    async fn test_list_repos_without_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/bob/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(mock_server.uri(), Some(String::new())).unwrap();
        let repos = client.list_repos("bob").await.unwrap();

        assert!(repos.is_empty());
        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_list_repos_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ghost/repos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(mock_server.uri(), None).unwrap();
        let err = client.list_repos("ghost").await.unwrap_err();

        assert!(matches!(err, GitHubError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_list_repos_bad_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(mock_server.uri(), None).unwrap();
        let err = client.list_repos("alice").await.unwrap_err();

        assert!(matches!(err, GitHubError::Decode(_)));
    }

    #[tokio::test]
    async fn test_invalid_username_skips_request() {
        let mock_server = MockServer::start().await;
        let client = GitHubClient::new(mock_server.uri(), None).unwrap();

        let err = client.list_repos("a/b").await.unwrap_err();

        assert!(matches!(err, GitHubError::InvalidUsername(_)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}
