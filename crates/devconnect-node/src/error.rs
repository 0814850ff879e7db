//! HTTP-facing errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use devconnect_auth::AuthError;
use devconnect_github::GitHubError;
use devconnect_social::SocialError;
use devconnect_storage::StorageError;
use serde::Serialize;
use validator::ValidationErrors;

use crate::validation::{field_errors, FieldError};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Credentials(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorsResponse {
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct MessageResponse {
    msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors })).into_response()
            }
            ApiError::Credentials(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorsResponse {
                    errors: vec![FieldError::message(msg)],
                }),
            )
                .into_response(),
            ApiError::BadRequest(msg) => message(StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => message(StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Server Error".into())
            }
        }
    }
}

fn message(status: StatusCode, msg: String) -> Response {
    (status, Json(MessageResponse { msg })).into_response()
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(field_errors(&errors))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUser(_) => ApiError::Credentials("User already exists".into()),
            AuthError::InvalidCredentials => ApiError::Credentials("Invalid Credentials".into()),
            AuthError::InvalidToken => ApiError::Unauthorized("Token is not valid".into()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        match err {
            SocialError::ProfileNotFound { .. } => {
                ApiError::BadRequest("There is no profile for this user".into())
            }
            SocialError::PostNotFound { .. } => ApiError::NotFound("Post not found".into()),
            SocialError::NotAuthor { .. } => ApiError::Unauthorized("User not authorized".into()),
            SocialError::AlreadyLiked { .. } => ApiError::BadRequest("Post already liked".into()),
            SocialError::NotLiked { .. } => {
                ApiError::BadRequest("Post has not yet been liked".into())
            }
            SocialError::Validation { field, message } => {
                ApiError::Validation(vec![FieldError::field(field, message)])
            }
            SocialError::Auth(err) => err.into(),
            SocialError::Storage(err) => err.into(),
        }
    }
}

impl From<GitHubError> for ApiError {
    fn from(err: GitHubError) -> Self {
        tracing::warn!(error = %err, "GitHub lookup failed");
        ApiError::NotFound("No Github profile found".into())
    }
}
