//! User HTTP Routes
//!
//! Profiles and follow edges.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};

use super::errors::ApiResult;
use super::extract::{ApiKey, PathId};
use super::response::{ResultResponse, UserResponse};
use super::state::AppState;

/// User routes with shared state
pub fn user_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/me", get(current_user_handler))
        .route("/users/:id", get(get_user_handler))
        .route("/users/:id/follow", post(follow_handler).delete(unfollow_handler))
        .with_state(state)
}

/// Profile of the caller (requires an API key)
async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
) -> ApiResult<Json<UserResponse>> {
    let profile = state.run(move |service| service.current_profile(&key)).await?;
    Ok(Json(UserResponse::new(profile)))
}

async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    PathId(user_id): PathId,
) -> ApiResult<Json<UserResponse>> {
    let profile = state.run(move |service| service.user_profile(user_id)).await?;
    Ok(Json(UserResponse::new(profile)))
}

async fn follow_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    PathId(user_id): PathId,
) -> ApiResult<(StatusCode, Json<ResultResponse>)> {
    state
        .run(move |service| service.follow_user(&key, user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(ResultResponse::success())))
}

async fn unfollow_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    PathId(user_id): PathId,
) -> ApiResult<StatusCode> {
    state
        .run(move |service| service.unfollow_user(&key, user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
