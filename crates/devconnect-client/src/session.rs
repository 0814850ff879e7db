//! # Session
//!
//! Account flows that tie API calls to state changes: register, login,
//! load the current user and log out.

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::state::{Action, AlertKind};
use crate::store::Store;
use crate::types::{LoginForm, RegisterForm};

/// A signed-in (or signing-in) user's session.
pub struct Session {
    api: ApiClient,
    store: Store,
}

impl Session {
    /// Creates a session from an API client and a store.
    ///
    /// A token already held in the store is used for requests.
    pub fn new(mut api: ApiClient, store: Store) -> Self {
        if let Some(token) = store.state().auth.token {
            api.set_token(Some(token));
        }
        Self { api, store }
    }

    /// The API client, carrying the session token.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The session state.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Registers an account, then loads it.
    pub async fn register(&mut self, form: &RegisterForm) -> ClientResult<()> {
        match self.api.register(form).await {
            Ok(token) => {
                self.api.set_token(Some(token.clone()));
                self.store.dispatch(Action::RegisterSuccess { token });
                self.load_user().await
            }
            Err(e) => {
                self.alert_errors(&e);
                self.store.dispatch(Action::RegisterFail);
                Err(e)
            }
        }
    }

    /// Logs in, then loads the account.
    pub async fn login(&mut self, form: &LoginForm) -> ClientResult<()> {
        match self.api.login(form).await {
            Ok(token) => {
                self.api.set_token(Some(token.clone()));
                self.store.dispatch(Action::LoginSuccess { token });
                self.load_user().await
            }
            Err(e) => {
                self.alert_errors(&e);
                self.store.dispatch(Action::LoginFail);
                Err(e)
            }
        }
    }

    /// Loads the account behind the session token.
    ///
    /// Any failure ends the session.
    pub async fn load_user(&mut self) -> ClientResult<()> {
        match self.api.load_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "User loaded");
                self.store.dispatch(Action::UserLoaded(user));
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to load user");
                self.api.set_token(None);
                self.store.dispatch(Action::AuthError);
                Err(e)
            }
        }
    }

    /// Ends the session.
    pub fn logout(&mut self) {
        self.api.set_token(None);
        self.store.dispatch(Action::Logout);
    }

    fn alert_errors(&self, err: &ClientError) {
        for msg in err.messages() {
            self.store.set_alert(msg, AlertKind::Danger, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, AuthState};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_user(server: &MockServer, token: &str) {
        Mock::given(method("GET"))
            .and(path("/api/auth"))
            .and(header("x-auth-token", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": uuid::Uuid::new_v4(),
                "name": "Alice",
                "email": "alice@example.com",
                "avatar": "https://www.gravatar.com/avatar/x",
                "date": "2024-01-01T00:00:00Z"
            })))
            .mount(server)
            .await;
    }

    fn session(server: &MockServer) -> Session {
        Session::new(ApiClient::new(server.uri()).unwrap(), Store::default())
    }

    #[tokio::test]
    async fn test_register_loads_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
            .mount(&server)
            .await;
        mount_user(&server, "abc").await;

        let mut session = session(&server);
        session
            .register(&RegisterForm {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        let auth = session.store().state().auth;
        assert_eq!(auth.token.as_deref(), Some("abc"));
        assert_eq!(auth.is_authenticated, Some(true));
        assert!(!auth.loading);
        assert_eq!(auth.user.unwrap().name, "Alice");
        assert_eq!(session.api().token(), Some("abc"));
    }

    #[tokio::test]
    async fn test_register_failure_raises_alerts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [
                    { "msg": "Name is required", "param": "name" },
                    { "msg": "Please include a valid email", "param": "email" }
                ]
            })))
            .mount(&server)
            .await;

        let mut session = session(&server);
        let result = session
            .register(&RegisterForm {
                name: String::new(),
                email: "nope".into(),
                password: "secret1".into(),
            })
            .await;
        assert!(result.is_err());

        let state = session.store().state();
        assert_eq!(state.auth.is_authenticated, Some(false));
        let messages: Vec<_> = state.alerts.iter().map(|a| a.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Name is required", "Please include a valid email"]
        );
        assert!(state.alerts.iter().all(|a| a.kind == AlertKind::Danger));
    }

    #[tokio::test]
    async fn test_login_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "msg": "Invalid Credentials" }]
            })))
            .mount(&server)
            .await;

        let mut session = session(&server);
        let err = session
            .login(&LoginForm {
                email: "alice@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.messages(), vec!["Invalid Credentials"]);
        let state = session.store().state();
        assert_eq!(state.auth.token, None);
        assert_eq!(state.alerts[0].msg, "Invalid Credentials");
    }

    #[tokio::test]
    async fn test_stale_token_ends_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "msg": "Token is not valid" })),
            )
            .mount(&server)
            .await;

        let store = Store::new(AppState {
            auth: AuthState {
                token: Some("stale".into()),
                ..Default::default()
            },
            alerts: Vec::new(),
        });
        let mut session = Session::new(ApiClient::new(server.uri()).unwrap(), store);
        assert_eq!(session.api().token(), Some("stale"));

        assert!(session.load_user().await.is_err());
        let auth = session.store().state().auth;
        assert_eq!(auth.token, None);
        assert_eq!(auth.is_authenticated, Some(false));
        assert_eq!(session.api().token(), None);
    }

    #[tokio::test]
    async fn test_logout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
            .mount(&server)
            .await;
        mount_user(&server, "abc").await;

        let mut session = session(&server);
        session
            .login(&LoginForm {
                email: "alice@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        session.logout();
        let auth = session.store().state().auth;
        assert_eq!(auth.user, None);
        assert_eq!(auth.is_authenticated, Some(false));
        assert_eq!(session.api().token(), None);
    }
}
