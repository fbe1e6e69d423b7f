//! # SQLite Store
//!
//! Owns the single SQLite connection and hands out transaction scopes.
//! Every caller runs inside [`Store::transaction`]: the closure's `Ok`
//! commits, any `Err` rolls the whole unit back.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use super::errors::{StoreError, StoreResult};
use super::models::SeedUser;
use super::users;

/// Schema SQL embedded at compile time.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Drops every table, children first.
const DROP_SQL: &str = "
    DROP TABLE IF EXISTS tweet_media;
    DROP TABLE IF EXISTS tweet_likes;
    DROP TABLE IF EXISTS follows;
    DROP TABLE IF EXISTS tweets;
    DROP TABLE IF EXISTS medias;
    DROP TABLE IF EXISTS users;
";

/// Path value that selects an in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Relational store backed by SQLite.
///
/// Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}

impl Store {
    /// Opens or creates a store at `path`.
    ///
    /// `":memory:"` opens an in-memory store instead.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path == Path::new(IN_MEMORY) {
            return Self::in_memory();
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        Self::initialize_connection(&conn)?;

        tracing::debug!(path = %path.display(), "opened store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates an in-memory store.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_connection(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    fn initialize_connection(conn: &Connection) -> StoreResult<()> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Database file location, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f` inside one immediate transaction.
    ///
    /// The connection lock is held for the whole call, so transactions
    /// never interleave.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        // Dropping `tx` on the error path rolls back.
        let value = f(&tx)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }

    /// Drops all data and inserts `seed` as the only users.
    ///
    /// Drop, recreate and seed run in one transaction: if any seed row is
    /// rejected the previous contents stay in place.
    pub fn reset_and_seed(&self, seed: &[SeedUser]) -> StoreResult<()> {
        self.transaction(|tx| {
            tx.execute_batch(DROP_SQL)?;
            tx.execute_batch(SCHEMA_SQL)?;
            for user in seed {
                users::insert(tx, user)?;
            }
            Ok::<_, StoreError>(())
        })?;
        tracing::warn!(users = seed.len(), "store reset, all data replaced by seed users");
        Ok(())
    }
}
