//! Client library for DevConnect.
//!
//! This crate provides:
//! - **API Client**: typed calls for every node endpoint
//! - **State**: session state and a pure reducer over [`Action`]s
//! - **Store**: observable state with self-expiring alerts
//! - **Session**: register, login and logout flows
//!
//! # Example
//!
//! ```
//! use devconnect_client::{reduce, Action, AppState};
//!
//! let state = reduce(AppState::default(), Action::LoginSuccess { token: "t".into() });
//! assert_eq!(state.auth.is_authenticated, Some(true));
//! assert!(!state.auth.loading);
//! ```

pub mod api;
pub mod error;
pub mod session;
pub mod state;
pub mod store;
pub mod types;

pub use api::{ApiClient, ProfileView, AUTH_HEADER};
pub use error::{ClientError, ClientResult};
pub use session::Session;
pub use state::{reduce, Action, Alert, AlertKind, AppState, AuthState};
pub use store::{Store, DEFAULT_ALERT_TIMEOUT};
pub use types::{
    EducationForm, ExperienceForm, LoginForm, MessageResponse, ProfileForm, RegisterForm,
    TokenResponse,
};
