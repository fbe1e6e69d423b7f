//! # Follow Edges

use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use super::errors::StoreResult;
use super::models::{FollowEdge, FollowId, UserId, UserSummary};

pub fn find(conn: &Connection, follower: UserId, following: UserId) -> StoreResult<Option<FollowEdge>> {
    let edge = conn
        .query_row(
            "SELECT id, follower, following FROM follows WHERE follower = ?1 AND following = ?2",
            params![follower, following],
            |row| {
                Ok(FollowEdge {
                    id: row.get(0)?,
                    follower: row.get(1)?,
                    following: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(edge)
}

pub fn insert(conn: &Connection, follower: UserId, following: UserId) -> StoreResult<FollowId> {
    conn.execute(
        "INSERT INTO follows (follower, following) VALUES (?1, ?2)",
        params![follower, following],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete(conn: &Connection, id: FollowId) -> StoreResult<bool> {
    let deleted = conn.execute("DELETE FROM follows WHERE id = ?1", params![id])?;
    Ok(deleted == 1)
}

/// Users following `user_id`, in edge creation order.
pub fn followers_of(conn: &Connection, user_id: UserId) -> StoreResult<Vec<UserSummary>> {
    summaries(
        conn,
        "SELECT u.id, u.name FROM follows f JOIN users u ON u.id = f.follower
         WHERE f.following = ?1 ORDER BY f.id",
        user_id,
    )
}

/// Users `user_id` follows, in edge creation order.
pub fn following_of(conn: &Connection, user_id: UserId) -> StoreResult<Vec<UserSummary>> {
    summaries(
        conn,
        "SELECT u.id, u.name FROM follows f JOIN users u ON u.id = f.following
         WHERE f.follower = ?1 ORDER BY f.id",
        user_id,
    )
}

/// Ids of the users following `user_id`.
pub fn follower_ids(conn: &Connection, user_id: UserId) -> StoreResult<HashSet<UserId>> {
    let mut stmt = conn.prepare("SELECT follower FROM follows WHERE following = ?1")?;
    let ids = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(ids)
}

fn summaries(conn: &Connection, sql: &str, user_id: UserId) -> StoreResult<Vec<UserSummary>> {
    let mut stmt = conn.prepare(sql)?;
    let users = stmt
        .query_map(params![user_id], |row| {
            Ok(UserSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}
