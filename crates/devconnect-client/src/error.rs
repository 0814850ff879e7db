//! # Client Errors
//!
//! Error types for API operations.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server rejected the request.
    #[error("server error: {status} - {}", messages.join("; "))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Messages from the error body.
        messages: Vec<String>,
    },

    /// Failed to deserialize response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Messages suitable for showing to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ClientError::Server { messages, .. } => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Build a server error from a status and response body.
    ///
    /// Understands both `{"errors":[{"msg":..}]}` and `{"msg":..}` bodies.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Msg {
            msg: String,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Body {
            Errors { errors: Vec<Msg> },
            Single(Msg),
        }

        let messages = match serde_json::from_str::<Body>(body) {
            Ok(Body::Errors { errors }) => errors.into_iter().map(|e| e.msg).collect(),
            Ok(Body::Single(m)) => vec![m.msg],
            Err(_) if body.is_empty() => Vec::new(),
            Err(_) => vec![body.to_string()],
        };

        ClientError::Server { status, messages }
    }
}

/// Result type for API operations.
pub type ClientResult<T> = Result<T, ClientError>;
