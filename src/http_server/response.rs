//! # Response Formatting
//!
//! Success bodies. Every one carries `result: true`.

use serde::Serialize;

use crate::service::{TweetView, UserProfile};
use crate::store::{MediaId, TweetId};

/// Bare success marker
#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    pub result: bool,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self { result: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetCreatedResponse {
    pub result: bool,
    pub tweet_id: TweetId,
}

impl TweetCreatedResponse {
    pub fn new(tweet_id: TweetId) -> Self {
        Self {
            result: true,
            tweet_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetsResponse {
    pub result: bool,
    pub tweets: Vec<TweetView>,
}

impl TweetsResponse {
    pub fn new(tweets: Vec<TweetView>) -> Self {
        Self {
            result: true,
            tweets,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaCreatedResponse {
    pub result: bool,
    pub media_id: MediaId,
}

impl MediaCreatedResponse {
    pub fn new(media_id: MediaId) -> Self {
        Self {
            result: true,
            media_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub result: bool,
    pub user: UserProfile,
}

impl UserResponse {
    pub fn new(user: UserProfile) -> Self {
        Self { result: true, user }
    }
}
