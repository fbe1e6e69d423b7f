//! Tweet HTTP Routes
//!
//! Listing, creation, deletion and likes.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};

use super::errors::{ApiError, ApiResult};
use super::extract::{ApiKey, PathId};
use super::response::{ResultResponse, TweetCreatedResponse, TweetsResponse};
use super::state::AppState;
use crate::service::NewTweet;

/// Tweet routes with shared state
pub fn tweet_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tweets", get(list_tweets_handler))
        .route("/tweets", post(create_tweet_handler))
        .route("/tweets/:id", delete(delete_tweet_handler))
        .route("/tweets/:id/likes", post(like_handler).delete(unlike_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_tweets_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
) -> ApiResult<Json<TweetsResponse>> {
    let tweets = state.run(move |service| service.list_tweets(&key)).await?;
    Ok(Json(TweetsResponse::new(tweets)))
}

async fn create_tweet_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    payload: Result<Json<NewTweet>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TweetCreatedResponse>)> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let tweet_id = state
        .run(move |service| service.create_tweet(&key, &request))
        .await?;
    Ok((StatusCode::CREATED, Json(TweetCreatedResponse::new(tweet_id))))
}

async fn delete_tweet_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    PathId(tweet_id): PathId,
) -> ApiResult<StatusCode> {
    state
        .run(move |service| service.delete_tweet(&key, tweet_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn like_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    PathId(tweet_id): PathId,
) -> ApiResult<(StatusCode, Json<ResultResponse>)> {
    state
        .run(move |service| service.like_tweet(&key, tweet_id))
        .await?;
    Ok((StatusCode::CREATED, Json(ResultResponse::success())))
}

async fn unlike_handler(
    State(state): State<Arc<AppState>>,
    ApiKey(key): ApiKey,
    PathId(tweet_id): PathId,
) -> ApiResult<StatusCode> {
    state
        .run(move |service| service.unlike_tweet(&key, tweet_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
