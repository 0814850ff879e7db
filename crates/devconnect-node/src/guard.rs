//! Token check for private routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use devconnect_types::UserId;

use crate::api::AppState;
use crate::error::ApiError;

/// Header carrying the session token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// The authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

/// Rejects requests without a valid `x-auth-token`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied".into()))?;

    let user_id = state.tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected token");
        ApiError::Unauthorized("Token is not valid".into())
    })?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}
