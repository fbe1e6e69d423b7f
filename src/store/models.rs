//! # Store Records
//!
//! Plain records as they are read from the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type TweetId = i64;
pub type MediaId = i64;
pub type FollowId = i64;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Display name (unique)
    pub name: String,

    /// Opaque bearer token, compared by exact match
    #[serde(skip_serializing)]
    pub api_key: String,
}

/// `{id, name}` pair used wherever another user is referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}

/// A tweet with its liker list and attachment list loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub id: TweetId,
    pub author_id: UserId,

    /// Author name copied at creation time
    pub author_name: String,

    pub content: String,

    /// Like counter, kept equal to `liked_by.len()`
    pub likes: i64,

    /// Likers in like order
    pub liked_by: Vec<UserId>,

    /// Attached media in attachment order
    pub attachments: Vec<MediaId>,

    pub created_at: DateTime<Utc>,
}

/// Directed follower -> following edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowEdge {
    pub id: FollowId,
    pub follower: UserId,
    pub following: UserId,
}

/// Uploaded media blob
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: MediaId,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// User inserted by the seed routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: UserId,
    pub name: String,
    pub api_key: String,
}

impl SeedUser {
    pub fn new(id: UserId, name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            api_key: api_key.into(),
        }
    }
}

/// Demo users inserted when no seed list is configured
pub fn default_seed_users() -> Vec<SeedUser> {
    vec![SeedUser::new(1, "John", "test"), SeedUser::new(2, "Alice", "test2")]
}
