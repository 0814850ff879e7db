//! # API Client
//!
//! HTTP client for communicating with `devconnect-node`.

use std::time::Duration;

use devconnect_auth::PublicUser;
use devconnect_github::RepoSummary;
use devconnect_social::{Like, Post, Profile};
use devconnect_types::{Author, EntryId, PostId, UserId};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::types::{
    EducationForm, ExperienceForm, LoginForm, MessageResponse, ProfileForm, RegisterForm,
    TokenResponse,
};

/// Header carrying the bearer token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// A profile as returned by read endpoints, with the owner embedded.
pub type ProfileView = Profile<Option<Author>>;

/// HTTP client for the DevConnect node API.
///
/// Holds the session token, if any, and attaches it to every request.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a new client for the node at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: None,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the token sent with requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The token sent with requests.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let res = builder.send().await?;
        Self::decode(res).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> ClientResult<T> {
        let res = builder.json(body).send().await?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> ClientResult<T> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        res.json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Checks if the node is reachable and healthy.
    pub async fn health(&self) -> ClientResult<bool> {
        let res = self.request(Method::GET, "/health").send().await?;
        Ok(res.status().is_success())
    }

    // Accounts

    /// Registers an account and returns its token.
    pub async fn register(&self, form: &RegisterForm) -> ClientResult<String> {
        let res: TokenResponse = self
            .send_json(self.request(Method::POST, "/api/users"), form)
            .await?;
        Ok(res.token)
    }

    /// Logs in and returns a token.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<String> {
        let res: TokenResponse = self
            .send_json(self.request(Method::POST, "/api/auth"), form)
            .await?;
        Ok(res.token)
    }

    /// Loads the account behind the current token.
    pub async fn load_user(&self) -> ClientResult<PublicUser> {
        self.send(self.request(Method::GET, "/api/auth")).await
    }

    // Profiles

    /// Lists all profiles.
    pub async fn list_profiles(&self) -> ClientResult<Vec<ProfileView>> {
        self.send(self.request(Method::GET, "/api/profile")).await
    }

    /// Fetches the current user's profile.
    pub async fn my_profile(&self) -> ClientResult<ProfileView> {
        self.send(self.request(Method::GET, "/api/profile/me")).await
    }

    /// Fetches a profile by its owner's id.
    pub async fn profile_by_user(&self, user_id: UserId) -> ClientResult<ProfileView> {
        self.send(self.request(Method::GET, &format!("/api/profile/user/{user_id}")))
            .await
    }

    /// Creates or updates the current user's profile.
    pub async fn upsert_profile(&self, form: &ProfileForm) -> ClientResult<Profile> {
        self.send_json(self.request(Method::POST, "/api/profile"), form)
            .await
    }

    /// Deletes the current user's profile and account.
    pub async fn delete_account(&self) -> ClientResult<String> {
        let res: MessageResponse = self
            .send(self.request(Method::DELETE, "/api/profile"))
            .await?;
        Ok(res.msg)
    }

    /// Adds an experience entry to the current user's profile.
    pub async fn add_experience(&self, form: &ExperienceForm) -> ClientResult<Profile> {
        self.send_json(self.request(Method::PUT, "/api/profile/experience"), form)
            .await
    }

    /// Removes an experience entry.
    pub async fn delete_experience(&self, id: EntryId) -> ClientResult<Profile> {
        self.send(self.request(Method::DELETE, &format!("/api/profile/experience/{id}")))
            .await
    }

    /// Adds an education entry to the current user's profile.
    pub async fn add_education(&self, form: &EducationForm) -> ClientResult<Profile> {
        self.send_json(self.request(Method::PUT, "/api/profile/education"), form)
            .await
    }

    /// Removes an education entry.
    pub async fn delete_education(&self, id: EntryId) -> ClientResult<Profile> {
        self.send(self.request(Method::DELETE, &format!("/api/profile/education/{id}")))
            .await
    }

    /// Lists a GitHub user's recent public repositories.
    pub async fn github_repos(&self, username: &str) -> ClientResult<Vec<RepoSummary>> {
        self.send(self.request(Method::GET, &format!("/api/profile/github/{username}")))
            .await
    }

    // Posts

    /// Lists all posts, newest first.
    pub async fn list_posts(&self) -> ClientResult<Vec<Post>> {
        self.send(self.request(Method::GET, "/api/posts")).await
    }

    /// Fetches a post.
    pub async fn get_post(&self, id: PostId) -> ClientResult<Post> {
        self.send(self.request(Method::GET, &format!("/api/posts/{id}")))
            .await
    }

    /// Creates a post.
    pub async fn create_post(&self, text: &str) -> ClientResult<Post> {
        self.send_json(
            self.request(Method::POST, "/api/posts"),
            &serde_json::json!({ "text": text }),
        )
        .await
    }

    /// Deletes one of the current user's posts.
    pub async fn delete_post(&self, id: PostId) -> ClientResult<String> {
        let res: MessageResponse = self
            .send(self.request(Method::DELETE, &format!("/api/posts/{id}")))
            .await?;
        Ok(res.msg)
    }

    /// Likes a post and returns its likes.
    pub async fn like(&self, id: PostId) -> ClientResult<Vec<Like>> {
        self.send(self.request(Method::PUT, &format!("/api/posts/like/{id}")))
            .await
    }

    /// Removes the current user's like and returns the remaining likes.
    pub async fn unlike(&self, id: PostId) -> ClientResult<Vec<Like>> {
        self.send(self.request(Method::PUT, &format!("/api/posts/unlike/{id}")))
            .await
    }
}
