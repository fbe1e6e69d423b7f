//! # Tweet Records
//!
//! Tweets plus their two child lists: likers (`tweet_likes`) and
//! attachments (`tweet_media`). The like counter on the tweet row is only
//! written by [`add_like`] and [`remove_like`], which update the liker list
//! in the same statement sequence.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::errors::StoreResult;
use super::models::{MediaId, Tweet, TweetId, User, UserId};

/// Inserts a tweet with zero likes and links `attachments` in order.
pub fn insert(
    conn: &Connection,
    author: &User,
    content: &str,
    attachments: &[MediaId],
    created_at: DateTime<Utc>,
) -> StoreResult<TweetId> {
    conn.execute(
        "INSERT INTO tweets (author_id, author_name, content, likes, created_at)
         VALUES (?1, ?2, ?3, 0, ?4)",
        params![author.id, author.name, content, created_at],
    )?;
    let tweet_id = conn.last_insert_rowid();

    let mut stmt =
        conn.prepare("INSERT INTO tweet_media (tweet_id, media_id, position) VALUES (?1, ?2, ?3)")?;
    for (position, media_id) in attachments.iter().enumerate() {
        stmt.execute(params![tweet_id, media_id, position as i64])?;
    }

    Ok(tweet_id)
}

/// Loads one tweet with its liker and attachment lists.
pub fn find(conn: &Connection, id: TweetId) -> StoreResult<Option<Tweet>> {
    let row = conn
        .query_row(
            "SELECT id, author_id, author_name, content, likes, created_at
             FROM tweets WHERE id = ?1",
            params![id],
            |row| {
                Ok(Tweet {
                    id: row.get(0)?,
                    author_id: row.get(1)?,
                    author_name: row.get(2)?,
                    content: row.get(3)?,
                    likes: row.get(4)?,
                    liked_by: Vec::new(),
                    attachments: Vec::new(),
                    created_at: row.get(5)?,
                })
            },
        )
        .optional()?;

    let Some(mut tweet) = row else {
        return Ok(None);
    };
    tweet.liked_by = likers(conn, id)?;
    tweet.attachments = attachments(conn, id)?;
    Ok(Some(tweet))
}

/// Loads every tweet in ascending id order.
pub fn list_all(conn: &Connection) -> StoreResult<Vec<Tweet>> {
    let mut liked_by = grouped(
        conn,
        "SELECT tweet_id, user_id FROM tweet_likes ORDER BY seq",
    )?;
    let mut attachments = grouped(
        conn,
        "SELECT tweet_id, media_id FROM tweet_media ORDER BY tweet_id, position",
    )?;

    let mut stmt = conn.prepare(
        "SELECT id, author_id, author_name, content, likes, created_at
         FROM tweets ORDER BY id",
    )?;
    let tweets = stmt
        .query_map([], |row| {
            let id: TweetId = row.get(0)?;
            Ok(Tweet {
                id,
                author_id: row.get(1)?,
                author_name: row.get(2)?,
                content: row.get(3)?,
                likes: row.get(4)?,
                liked_by: liked_by.remove(&id).unwrap_or_default(),
                attachments: attachments.remove(&id).unwrap_or_default(),
                created_at: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tweets)
}

fn grouped(conn: &Connection, sql: &str) -> StoreResult<HashMap<TweetId, Vec<i64>>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut groups: HashMap<TweetId, Vec<i64>> = HashMap::new();
    while let Some(row) = rows.next()? {
        groups.entry(row.get(0)?).or_default().push(row.get(1)?);
    }
    Ok(groups)
}

/// Likers of `tweet_id` in like order.
pub fn likers(conn: &Connection, tweet_id: TweetId) -> StoreResult<Vec<UserId>> {
    let mut stmt =
        conn.prepare("SELECT user_id FROM tweet_likes WHERE tweet_id = ?1 ORDER BY seq")?;
    let ids = stmt
        .query_map(params![tweet_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Attached media of `tweet_id` in attachment order.
pub fn attachments(conn: &Connection, tweet_id: TweetId) -> StoreResult<Vec<MediaId>> {
    let mut stmt = conn
        .prepare("SELECT media_id FROM tweet_media WHERE tweet_id = ?1 ORDER BY position")?;
    let ids = stmt
        .query_map(params![tweet_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Appends `user_id` to the liker list and bumps the counter by one.
///
/// Fails with a constraint violation when the user already likes the tweet.
pub fn add_like(conn: &Connection, tweet_id: TweetId, user_id: UserId) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO tweet_likes (tweet_id, user_id) VALUES (?1, ?2)",
        params![tweet_id, user_id],
    )?;
    conn.execute(
        "UPDATE tweets SET likes = likes + 1 WHERE id = ?1",
        params![tweet_id],
    )?;
    Ok(())
}

/// Removes `user_id` from the liker list and drops the counter by one.
///
/// Returns false, touching nothing, when the user did not like the tweet.
pub fn remove_like(conn: &Connection, tweet_id: TweetId, user_id: UserId) -> StoreResult<bool> {
    let removed = conn.execute(
        "DELETE FROM tweet_likes WHERE tweet_id = ?1 AND user_id = ?2",
        params![tweet_id, user_id],
    )?;
    if removed == 0 {
        return Ok(false);
    }
    conn.execute(
        "UPDATE tweets SET likes = likes - 1 WHERE id = ?1",
        params![tweet_id],
    )?;
    Ok(true)
}

/// Deletes the tweet row; likers and attachment links cascade.
///
/// The media rows themselves are left to the caller.
pub fn delete(conn: &Connection, tweet_id: TweetId) -> StoreResult<bool> {
    let deleted = conn.execute("DELETE FROM tweets WHERE id = ?1", params![tweet_id])?;
    Ok(deleted == 1)
}
