//! # DevConnect Node
//!
//! HTTP API server for a developer social network: accounts, developer
//! profiles with GitHub repository listings, and posts with likes.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    HTTP API Layer                     │
//! │  • /api/users      registration                       │
//! │  • /api/auth       login, current user                │
//! │  • /api/profile    profiles, experience, education    │
//! │  • /api/posts      posts and likes                    │
//! └───────────────────────────────────────────────────────┘
//!              │ x-auth-token checked by guard::require_auth
//! ┌───────────────────────────────────────────────────────┐
//! │  CredentialStore · ProfileStore · PostStore · GitHub  │
//! └───────────────────────────────────────────────────────┘
//!              │
//! ┌───────────────────────────────────────────────────────┐
//! │        Document store (memory:// or rocksdb://)       │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=change-me cargo run --bin devconnect-node -- --port 5000
//! ```
//!
//! ## Example: Creating an AppState
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use devconnect_auth::JwtTokenService;
//! use devconnect_github::GitHubClient;
//! use devconnect_node::api::{create_router, AppState};
//!
//! let backend = devconnect_storage::open("memory://").unwrap();
//! let tokens = Arc::new(JwtTokenService::new("change-me"));
//! let github = Arc::new(GitHubClient::public(None).unwrap());
//!
//! let state = AppState::new(backend, tokens, github);
//! let app = create_router(state);
//! ```

pub mod api;
pub mod auth_api;
pub mod config;
pub mod error;
pub mod guard;
pub mod observability;
pub mod posts_api;
pub mod profile_api;
pub mod users_api;
pub mod validation;
