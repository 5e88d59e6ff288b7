//! Key/value state repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store serialized records under well-known storage keys.
//! - Keep SQL details inside the repository boundary.
//!
//! # Invariants
//! - One row per key; `set_item` replaces the previous value.
//! - Values are opaque text to the repository.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by state repository operations.
pub type StateRepoResult<T> = Result<T, StateRepoError>;

/// Errors from state repository operations.
#[derive(Debug)]
pub enum StateRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Storage key is blank.
    InvalidKey,
}

impl Display for StateRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "state repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "state repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "state repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidKey => write!(f, "storage key must not be blank"),
        }
    }
}

impl Error for StateRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StateRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StateRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key/value storage used by the stores.
pub trait StateRepository {
    /// Loads the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StateRepoResult<Option<String>>;
    /// Inserts or replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> StateRepoResult<()>;
    /// Removes `key`. Missing keys are not an error.
    fn remove_item(&self, key: &str) -> StateRepoResult<()>;
}

impl<T: StateRepository + ?Sized> StateRepository for &T {
    fn get_item(&self, key: &str) -> StateRepoResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StateRepoResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StateRepoResult<()> {
        (**self).remove_item(key)
    }
}

/// SQLite-backed state repository over a borrowed or owned connection.
pub struct SqliteStateRepository<C = Connection> {
    conn: C,
}

impl<C: Borrow<Connection>> SqliteStateRepository<C> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: C) -> StateRepoResult<Self> {
        ensure_state_connection_ready(conn.borrow())?;
        Ok(Self { conn })
    }

    fn conn(&self) -> &Connection {
        self.conn.borrow()
    }
}

impl<C: Borrow<Connection>> StateRepository for SqliteStateRepository<C> {
    fn get_item(&self, key: &str) -> StateRepoResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StateRepoResult<()> {
        let key = normalize_key(key)?;
        self.conn().execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StateRepoResult<()> {
        let key = normalize_key(key)?;
        self.conn()
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn normalize_key(key: &str) -> StateRepoResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StateRepoError::InvalidKey);
    }
    Ok(trimmed)
}

fn ensure_state_connection_ready(conn: &Connection) -> StateRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StateRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "kv_store")? {
        return Err(StateRepoError::MissingRequiredTable("kv_store"));
    }

    for column in ["key", "value", "updated_at"] {
        if !table_has_column(conn, "kv_store", column)? {
            return Err(StateRepoError::MissingRequiredColumn {
                table: "kv_store",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StateRepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StateRepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
