//! # Session State
//!
//! Client state and the actions that change it. [`reduce`] is a pure
//! function so every transition can be tested without a runtime.

use devconnect_auth::PublicUser;
use uuid::Uuid;

/// Everything the UI renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Authentication status.
    pub auth: AuthState,
    /// Visible alerts, oldest first.
    pub alerts: Vec<Alert>,
}

/// Authentication status.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// Bearer token for protected requests.
    pub token: Option<String>,
    /// `None` until the first auth outcome is known.
    pub is_authenticated: Option<bool>,
    /// True until the first auth outcome is known.
    pub loading: bool,
    /// The loaded account, if any.
    pub user: Option<PublicUser>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            is_authenticated: None,
            loading: true,
            user: None,
        }
    }
}

/// Kind of alert, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Unique id, used to remove the alert later.
    pub id: Uuid,
    /// Message text.
    pub msg: String,
    /// Alert kind.
    pub kind: AlertKind,
}

impl Alert {
    /// Creates an alert with a fresh id.
    pub fn new(msg: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg: msg.into(),
            kind,
        }
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetAlert(Alert),
    RemoveAlert(Uuid),
    RegisterSuccess { token: String },
    RegisterFail,
    LoginSuccess { token: String },
    LoginFail,
    UserLoaded(PublicUser),
    AuthError,
    Logout,
}

/// Applies an action to the state.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetAlert(alert) => state.alerts.push(alert),
        Action::RemoveAlert(id) => state.alerts.retain(|a| a.id != id),
        Action::RegisterSuccess { token } | Action::LoginSuccess { token } => {
            state.auth.token = Some(token);
            state.auth.is_authenticated = Some(true);
            state.auth.loading = false;
        }
        Action::UserLoaded(user) => {
            state.auth.user = Some(user);
            state.auth.is_authenticated = Some(true);
            state.auth.loading = false;
        }
        Action::RegisterFail | Action::LoginFail | Action::AuthError | Action::Logout => {
            state.auth = AuthState {
                token: None,
                is_authenticated: Some(false),
                loading: false,
                user: None,
            };
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> PublicUser {
        PublicUser {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            avatar: "https://www.gravatar.com/avatar/x".into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert!(state.auth.loading);
        assert_eq!(state.auth.is_authenticated, None);
        assert!(state.auth.token.is_none());
        assert!(state.alerts.is_empty());
    }

    #[test]
    fn test_alerts() {
        let first = Alert::new("Name is required", AlertKind::Danger);
        let second = Alert::new("Profile updated", AlertKind::Success);

        let state = reduce(AppState::default(), Action::SetAlert(first.clone()));
        let state = reduce(state, Action::SetAlert(second.clone()));
        assert_eq!(state.alerts, vec![first.clone(), second.clone()]);

        let state = reduce(state, Action::RemoveAlert(first.id));
        assert_eq!(state.alerts, vec![second]);

        // Unknown ids are ignored
        let state = reduce(state, Action::RemoveAlert(Uuid::new_v4()));
        assert_eq!(state.alerts.len(), 1);
    }

    #[test]
    fn test_login_then_logout() {
        let state = reduce(
            AppState::default(),
            Action::LoginSuccess {
                token: "t".into(),
            },
        );
        assert_eq!(state.auth.token.as_deref(), Some("t"));
        assert_eq!(state.auth.is_authenticated, Some(true));
        assert!(!state.auth.loading);

        let state = reduce(state, Action::UserLoaded(user()));
        assert_eq!(state.auth.user.as_ref().unwrap().name, "Alice");

        let state = reduce(state, Action::Logout);
        assert_eq!(state.auth.token, None);
        assert_eq!(state.auth.user, None);
        assert_eq!(state.auth.is_authenticated, Some(false));
        assert!(!state.auth.loading);
    }

    #[test]
    fn test_failures_clear_session() {
        for action in [Action::RegisterFail, Action::LoginFail, Action::AuthError] {
            let state = reduce(
                AppState::default(),
                Action::RegisterSuccess {
                    token: "t".into(),
                },
            );
            let state = reduce(state, action.clone());
            assert_eq!(state.auth.token, None, "{action:?}");
            assert_eq!(state.auth.is_authenticated, Some(false));
        }
    }

    #[test]
    fn test_alerts_survive_auth_changes() {
        let alert = Alert::new("Invalid Credentials", AlertKind::Danger);
        let state = reduce(AppState::default(), Action::SetAlert(alert.clone()));
        let state = reduce(state, Action::LoginFail);
        assert_eq!(state.alerts, vec![alert]);
    }
}
