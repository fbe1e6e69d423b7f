//! # User Records

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::errors::StoreResult;
use super::models::{SeedUser, User, UserId};

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        api_key: row.get(2)?,
    })
}

/// Returns the user whose API key matches `api_key` exactly.
pub fn find_by_api_key(conn: &Connection, api_key: &str) -> StoreResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, api_key FROM users WHERE api_key = ?1",
            params![api_key],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_id(conn: &Connection, id: UserId) -> StoreResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, api_key FROM users WHERE id = ?1",
            params![id],
            map_user,
        )
        .optional()?;
    Ok(user)
}

/// Id -> name for every user.
pub fn names(conn: &Connection) -> StoreResult<HashMap<UserId, String>> {
    let mut stmt = conn.prepare("SELECT id, name FROM users")?;
    let names = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(names)
}

pub fn insert(conn: &Connection, user: &SeedUser) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, api_key) VALUES (?1, ?2, ?3)",
        params![user.id, user.name, user.api_key],
    )?;
    Ok(())
}
