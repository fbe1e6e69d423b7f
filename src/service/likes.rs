//! # Likes

use super::errors::{ServiceError, ServiceResult};
use super::SocialService;
use crate::store::{tweets, TweetId};

impl SocialService {
    /// Adds the caller to the tweet's liker list.
    pub fn like_tweet(&self, api_key: &str, tweet_id: TweetId) -> ServiceResult<()> {
        self.authorized(api_key, |conn, user| {
            let tweet = tweets::find(conn, tweet_id)?.ok_or_else(|| ServiceError::not_found("Tweet"))?;
            if tweet.liked_by.contains(&user.id) {
                return Err(ServiceError::conflict("You already liked this tweet"));
            }

            tweets::add_like(conn, tweet_id, user.id)?;
            tracing::debug!(tweet_id, user_id = user.id, "tweet liked");
            Ok(())
        })
    }

    /// Removes the caller from the tweet's liker list.
    pub fn unlike_tweet(&self, api_key: &str, tweet_id: TweetId) -> ServiceResult<()> {
        self.authorized(api_key, |conn, user| {
            if tweets::find(conn, tweet_id)?.is_none() {
                return Err(ServiceError::not_found("Tweet"));
            }
            if !tweets::remove_like(conn, tweet_id, user.id)? {
                return Err(ServiceError::conflict("You have not liked this tweet"));
            }

            tracing::debug!(tweet_id, user_id = user.id, "tweet unliked");
            Ok(())
        })
    }
}
