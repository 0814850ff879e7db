//! HTTP API for the DevConnect node.
//!
//! Wires the account, profile and post stores behind one axum router.

use axum::{
    http::{header, HeaderName, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use devconnect_auth::{CredentialStore, TokenService};
use devconnect_github::RepoLookup;
use devconnect_social::{PostStore, ProfileStore};
use devconnect_storage::DocumentBackend;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth_api::auth_routes;
use crate::guard::AUTH_HEADER;
use crate::observability::request_id_layer;
use crate::posts_api::posts_routes;
use crate::profile_api::profile_routes;
use crate::users_api::users_routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User accounts and credentials.
    pub credentials: Arc<CredentialStore>,
    /// Developer profiles.
    pub profiles: Arc<ProfileStore>,
    /// Posts and likes.
    pub posts: Arc<PostStore>,
    /// Issues and verifies session tokens.
    pub tokens: Arc<dyn TokenService>,
    /// GitHub repository lookups.
    pub repos: Arc<dyn RepoLookup>,
}

impl AppState {
    /// Build the stores on top of one backend.
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        tokens: Arc<dyn TokenService>,
        repos: Arc<dyn RepoLookup>,
    ) -> Self {
        Self {
            credentials: Arc::new(CredentialStore::new(Arc::clone(&backend))),
            profiles: Arc::new(ProfileStore::new(Arc::clone(&backend))),
            posts: Arc::new(PostStore::new(backend)),
            tokens,
            repos,
        }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(AUTH_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_check))
        .merge(users_routes())
        .merge(auth_routes(state.clone()))
        .merge(profile_routes(state.clone()))
        .merge(posts_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
