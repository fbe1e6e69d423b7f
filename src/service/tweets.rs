//! # Tweets
//!
//! Creation, deletion and the ranked listing.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::errors::{ServiceError, ServiceResult};
use super::SocialService;
use crate::store::{follows, media, tweets, users, MediaId, Tweet, TweetId, UserId, UserSummary};

/// Tweet creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTweet {
    #[serde(alias = "content")]
    pub tweet_data: String,

    /// Ids of already uploaded media, in display order
    #[serde(default)]
    pub tweet_media_ids: Vec<MediaId>,
}

impl NewTweet {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tweet_data: content.into(),
            tweet_media_ids: Vec::new(),
        }
    }

    pub fn with_media(mut self, media_ids: Vec<MediaId>) -> Self {
        self.tweet_media_ids = media_ids;
        self
    }
}

/// A liker as shown in tweet listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeView {
    pub user_id: UserId,
    pub name: String,
}

/// A tweet as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetView {
    pub id: TweetId,
    pub content: String,
    pub attachments: Vec<String>,
    pub author: UserSummary,
    pub like_count: i64,
    pub likes: Vec<LikeView>,
}

/// URL a media id is served from
pub fn media_url(id: MediaId) -> String {
    format!("/api/medias/{}", id)
}

/// Orders tweets by how many of `followers` liked each one, most first.
///
/// The sort is stable: ties keep their incoming order.
pub fn rank_by_follower_likes(tweets: &mut [Tweet], followers: &HashSet<UserId>) {
    tweets.sort_by_key(|tweet| {
        Reverse(
            tweet
                .liked_by
                .iter()
                .filter(|id| followers.contains(*id))
                .count(),
        )
    });
}

impl SocialService {
    /// Posts a tweet for the caller.
    ///
    /// Every attachment must be an existing media row not yet attached to
    /// another tweet.
    pub fn create_tweet(&self, api_key: &str, request: &NewTweet) -> ServiceResult<TweetId> {
        self.authorized(api_key, |conn, user| {
            let mut seen = HashSet::new();
            for &media_id in &request.tweet_media_ids {
                if !seen.insert(media_id) {
                    return Err(ServiceError::conflict(format!(
                        "Media {} is listed more than once",
                        media_id
                    )));
                }
                if !media::exists(conn, media_id)? {
                    return Err(ServiceError::not_found(format!("Media {}", media_id)));
                }
                if let Some(tweet_id) = media::attached_to(conn, media_id)? {
                    return Err(ServiceError::conflict(format!(
                        "Media {} is already attached to tweet {}",
                        media_id, tweet_id
                    )));
                }
            }

            let tweet_id = tweets::insert(
                conn,
                user,
                &request.tweet_data,
                &request.tweet_media_ids,
                Utc::now(),
            )?;
            tracing::info!(tweet_id, author_id = user.id, "tweet created");
            Ok(tweet_id)
        })
    }

    /// Deletes one of the caller's tweets together with its media.
    ///
    /// A missing tweet and a tweet owned by someone else both report
    /// `NotFound`.
    pub fn delete_tweet(&self, api_key: &str, tweet_id: TweetId) -> ServiceResult<()> {
        self.authorized(api_key, |conn, user| {
            let tweet = tweets::find(conn, tweet_id)?
                .filter(|tweet| tweet.author_id == user.id)
                .ok_or_else(|| ServiceError::not_found("Tweet"))?;

            tweets::delete(conn, tweet.id)?;
            let removed = media::delete_many(conn, &tweet.attachments)?;
            tracing::info!(tweet_id, author_id = user.id, media_removed = removed, "tweet deleted");
            Ok(())
        })
    }

    /// Lists every tweet, ranked for the caller.
    pub fn list_tweets(&self, api_key: &str) -> ServiceResult<Vec<TweetView>> {
        self.authorized(api_key, |conn, user| {
            let names = users::names(conn)?;
            let followers = follows::follower_ids(conn, user.id)?;

            let mut all = tweets::list_all(conn)?;
            rank_by_follower_likes(&mut all, &followers);

            Ok(all.into_iter().map(|tweet| to_view(tweet, &names)).collect())
        })
    }
}

fn to_view(tweet: Tweet, names: &HashMap<UserId, String>) -> TweetView {
    let likes = tweet
        .liked_by
        .iter()
        .map(|&user_id| LikeView {
            user_id,
            name: names.get(&user_id).cloned().unwrap_or_default(),
        })
        .collect();

    TweetView {
        id: tweet.id,
        content: tweet.content,
        attachments: tweet.attachments.into_iter().map(media_url).collect(),
        author: UserSummary {
            id: tweet.author_id,
            name: tweet.author_name,
        },
        like_count: tweet.likes,
        likes,
    }
}
