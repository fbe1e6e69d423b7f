//! # Microblog Store
//!
//! Relational persistence on SQLite. Record modules expose free functions
//! over a borrowed [`rusqlite::Connection`]; callers get one from
//! [`Store::transaction`], so every function composes into the caller's
//! transaction.

pub mod errors;
pub mod follows;
pub mod media;
pub mod models;
pub mod sqlite;
pub mod tweets;
pub mod users;

pub use errors::{StoreError, StoreResult};
pub use models::{
    default_seed_users, FollowEdge, FollowId, Media, MediaId, SeedUser, Tweet, TweetId, User,
    UserId, UserSummary,
};
pub use sqlite::{Store, IN_MEMORY};
