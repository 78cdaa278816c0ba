//! SQLite-backed user store.

use rusqlite::{Connection, OptionalExtension, ffi, params};
use std::path::{Path, PathBuf};

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert rejected by the `UNIQUE` constraint on `username`
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Handle to the users table
///
/// Holds only the database path. Every operation opens its own connection and
/// drops it before returning, on success and error alike.
#[derive(Clone, Debug)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the users table if it does not exist yet
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Round-trip a trivial query to prove the database is reachable
    pub fn ping(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Look up a user by exact username
    pub fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.connect()?;
        let user = conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Insert a new user, mapping a uniqueness violation to [`StoreError::UsernameTaken`]
    ///
    /// Other constraint failures stay [`StoreError::Database`].
    pub fn insert_user(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        match conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, password_hash],
        ) {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Insert `username` unless it already exists; returns whether a row was added
    pub fn seed_user(&self, username: &str, password_hash: &str) -> Result<bool, StoreError> {
        match self.insert_user(username, password_hash) {
            Ok(_) => Ok(true),
            Err(StoreError::UsernameTaken) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn count_users_named(&self, username: &str) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn count_users(&self) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}
