//! Login and session endpoints.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use devconnect_auth::PublicUser;

use crate::api::AppState;
use crate::error::ApiError;
use crate::guard::{require_auth, AuthUser};
use crate::users_api::TokenResponse;
use crate::validation::{LoginRequest, ValidatedJson};

/// Creates the login and session routes.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/api/auth", post(login));
    let private = Router::new()
        .route("/api/auth", get(load_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public.merge(private)
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.credentials.authenticate(&req.email, &req.password)?;
    let token = state.tokens.issue(user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(TokenResponse { token }))
}

/// The authenticated user's account.
async fn load_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<PublicUser>, ApiError> {
    state
        .credentials
        .find_by_id(user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}
