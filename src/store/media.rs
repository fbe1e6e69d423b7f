//! # Media Records

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::errors::StoreResult;
use super::models::{Media, MediaId, TweetId};

pub fn insert(
    conn: &Connection,
    filename: &str,
    content_type: &str,
    data: &[u8],
    created_at: DateTime<Utc>,
) -> StoreResult<MediaId> {
    conn.execute(
        "INSERT INTO medias (filename, content_type, data, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![filename, content_type, data, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: MediaId) -> StoreResult<Option<Media>> {
    let media = conn
        .query_row(
            "SELECT id, filename, content_type, data, created_at FROM medias WHERE id = ?1",
            params![id],
            |row| {
                Ok(Media {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    content_type: row.get(2)?,
                    data: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(media)
}

pub fn exists(conn: &Connection, id: MediaId) -> StoreResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM medias WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Tweet the media is attached to, if any.
pub fn attached_to(conn: &Connection, id: MediaId) -> StoreResult<Option<TweetId>> {
    let tweet_id = conn
        .query_row(
            "SELECT tweet_id FROM tweet_media WHERE media_id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(tweet_id)
}

/// Deletes the given media rows, returning how many existed.
pub fn delete_many(conn: &Connection, ids: &[MediaId]) -> StoreResult<usize> {
    let mut stmt = conn.prepare("DELETE FROM medias WHERE id = ?1")?;
    let mut deleted = 0;
    for id in ids {
        deleted += stmt.execute(params![id])?;
    }
    Ok(deleted)
}
