//! Developer profile endpoints.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use devconnect_github::RepoSummary;
use devconnect_social::{Profile, ProfilePatch, SocialError};
use devconnect_types::{parse_id, Author};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::error::ApiError;
use crate::guard::{require_auth, AuthUser};
use crate::validation::{EducationRequest, ExperienceRequest, ProfileRequest, ValidatedJson};

/// A profile with its owner's name and avatar.
pub type ProfileView = Profile<Option<Author>>;

/// Creates the profile routes.
pub fn profile_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/profile", get(list_profiles))
        .route("/api/profile/user/{user_id}", get(get_profile_by_user))
        .route("/api/profile/github/{username}", get(github_repos));

    let private = Router::new()
        .route("/api/profile", post(upsert_profile).delete(delete_profile))
        .route("/api/profile/me", get(get_own_profile))
        .route("/api/profile/experience", put(add_experience))
        .route("/api/profile/experience/{exp_id}", delete(remove_experience))
        .route("/api/profile/education", put(add_education))
        .route("/api/profile/education/{edu_id}", delete(remove_education))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public.merge(private)
}

/// Attach the owner's public identity to a profile.
fn populate(state: &AppState, profile: Profile) -> Result<ProfileView, ApiError> {
    let author = state.credentials.find_by_id(profile.user)?.map(|u| u.author());
    Ok(profile.populate(author))
}

/// List all profiles.
async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let profiles: Vec<ProfileView> = state
        .profiles
        .list_all()?
        .into_iter()
        .map(|p| populate(&state, p))
        .collect::<Result<_, _>>()?;
    Ok(Json(profiles))
}

/// The authenticated user's profile.
async fn get_own_profile(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = state.profiles.get_own(user_id)?;
    Ok(Json(populate(&state, profile)?))
}

/// Look up a profile by its owner's ID.
async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let not_found = || ApiError::BadRequest("Profile not found".into());

    let user_id = parse_id(&user_id).ok_or_else(not_found)?;
    let profile = match state.profiles.get_by_user_id(user_id) {
        Ok(profile) => profile,
        Err(SocialError::ProfileNotFound { .. }) => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };
    Ok(Json(populate(&state, profile)?))
}

/// Create or update the authenticated user's profile.
async fn upsert_profile(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let patch = ProfilePatch::from(req);
    Ok(Json(state.profiles.upsert(user_id, &patch)?))
}

/// Delete the authenticated user's profile and account.
async fn delete_profile(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    state.profiles.delete_own(user_id, &state.credentials)?;
    Ok(Json(json!({ "msg": "User removed" })))
}

async fn add_experience(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<ExperienceRequest>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.add_experience(user_id, req.into())?))
}

async fn remove_experience(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = match parse_id(&exp_id) {
        Some(id) => state.profiles.remove_experience(user_id, id)?,
        // An id that cannot exist removes nothing.
        None => state.profiles.get_own(user_id)?,
    };
    Ok(Json(profile))
}

async fn add_education(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<EducationRequest>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.add_education(user_id, req.into())?))
}

async fn remove_education(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = match parse_id(&edu_id) {
        Some(id) => state.profiles.remove_education(user_id, id)?,
        None => state.profiles.get_own(user_id)?,
    };
    Ok(Json(profile))
}

/// Recent public repositories of a GitHub user.
async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<RepoSummary>>, ApiError> {
    Ok(Json(state.repos.list_repos(&username).await?))
}
