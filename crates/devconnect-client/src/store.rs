//! # Store
//!
//! Shared, observable [`AppState`]. Actions are applied synchronously
//! through [`reduce`] and every change is published on a watch channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::state::{reduce, Action, Alert, AlertKind, AppState};

/// How long an alert stays visible unless told otherwise.
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the client state. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    state: Arc<watch::Sender<AppState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    /// Creates a store holding `initial`.
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
        }
    }

    /// Applies an action and notifies subscribers.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "Dispatching action");
        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), action));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Shows an alert and removes it after `timeout` (5 seconds by default).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_alert(
        &self,
        msg: impl Into<String>,
        kind: AlertKind,
        timeout: Option<Duration>,
    ) -> uuid::Uuid {
        let alert = Alert::new(msg, kind);
        let id = alert.id;
        self.dispatch(Action::SetAlert(alert));

        let store = self.clone();
        let timeout = timeout.unwrap_or(DEFAULT_ALERT_TIMEOUT);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            store.dispatch(Action::RemoveAlert(id));
        });

        id
    }
}
