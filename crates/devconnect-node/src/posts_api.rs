//! Post and like endpoints. All of them require a session.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use devconnect_social::{AuthorSnapshot, Like, Post};
use devconnect_types::{parse_id, PostId};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::error::ApiError;
use crate::guard::{require_auth, AuthUser};
use crate::validation::{PostRequest, ValidatedJson};

/// Creates the post routes.
pub fn posts_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/like/{id}", put(like_post))
        .route("/api/posts/unlike/{id}", put(unlike_post))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

fn post_id(raw: &str) -> Result<PostId, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound("Post not found".into()))
}

async fn create_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<Post>, ApiError> {
    let user = state
        .credentials
        .find_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let author = AuthorSnapshot::from(user.author());
    Ok(Json(state.posts.create(user_id, author, &req.text)?))
}

/// All posts, newest first.
async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_all()?))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get_by_id(post_id(&id)?)?))
}

async fn delete_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.posts.delete(post_id(&id)?, user_id)?;
    Ok(Json(json!({ "msg": "Post removed" })))
}

async fn like_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    Ok(Json(state.posts.like(post_id(&id)?, user_id)?))
}

async fn unlike_post(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    Ok(Json(state.posts.unlike(post_id(&id)?, user_id)?))
}
