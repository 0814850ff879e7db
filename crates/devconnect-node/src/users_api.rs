//! Account registration endpoint.

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::api::AppState;
use crate::error::ApiError;
use crate::validation::{RegisterRequest, ValidatedJson};

/// Creates the registration routes.
pub fn users_routes() -> Router<AppState> {
    Router::new().route("/api/users", post(register))
}

/// Session token returned on registration and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a user and log them in.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .credentials
        .register(&req.name, &req.email, &req.password)?;
    let token = state.tokens.issue(user.id)?;

    Ok(Json(TokenResponse { token }))
}
