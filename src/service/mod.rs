//! # Social Service
//!
//! The operations behind every endpoint: tweets, likes, follows, media and
//! profiles. Each public method is one store transaction. Methods that act
//! on behalf of a caller go through [`SocialService::authorized`], which
//! resolves the API key inside that same transaction before the body runs.

pub mod errors;
pub mod follows;
pub mod likes;
pub mod media;
pub mod tweets;
pub mod users;

use rusqlite::Connection;

use crate::store::{users as user_records, Store, User};

pub use errors::{ServiceError, ServiceResult};
pub use media::NewMedia;
pub use tweets::{LikeView, NewTweet, TweetView};
pub use users::UserProfile;

/// Entry point for all social operations.
#[derive(Debug, Clone)]
pub struct SocialService {
    store: Store,
}

impl SocialService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Opens a transaction, authenticates `api_key`, then runs `body`.
    ///
    /// An unknown key fails with [`ServiceError::Unauthenticated`] before
    /// `body` runs. The transaction commits only if `body` succeeds.
    pub fn authorized<T, F>(&self, api_key: &str, body: F) -> ServiceResult<T>
    where
        F: FnOnce(&Connection, &User) -> ServiceResult<T>,
    {
        self.store.transaction(|tx| {
            let user = user_records::find_by_api_key(tx, api_key)?
                .ok_or(ServiceError::Unauthenticated)?;
            body(tx, &user)
        })
    }

    /// Resolves `api_key` to its user.
    pub fn authenticate(&self, api_key: &str) -> ServiceResult<User> {
        self.authorized(api_key, |_, user| Ok(user.clone()))
    }
}
