use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::capability::Preferences;
use crate::error::CapabilityError;

/// Durable key-value store backed by SQLite.
///
/// Keys live in a group (namespace), so several stores can share one
/// database file without seeing each other's values.
pub struct SqlitePreferences {
    conn: Arc<Mutex<Connection>>,
    group: String,
    db_path: Option<PathBuf>,
}

impl SqlitePreferences {
    /// Open or create the database at `db_path`, creating parent directories.
    pub fn open(db_path: &Path, group: impl Into<String>) -> Result<Self, CapabilityError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        log::info!("preferences database at {}", db_path.display());

        Self::with_connection(conn, group.into(), Some(db_path.to_path_buf()))
    }

    /// A store that lives only as long as this value
    pub fn in_memory(group: impl Into<String>) -> Result<Self, CapabilityError> {
        Self::with_connection(Connection::open_in_memory()?, group.into(), None)
    }

    fn with_connection(
        conn: Connection,
        group: String,
        db_path: Option<PathBuf>,
    ) -> Result<Self, CapabilityError> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            group,
            db_path,
        })
    }

    /// Create the preferences table if it doesn't exist.
    fn init_schema(conn: &Connection) -> Result<(), CapabilityError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                grp             TEXT NOT NULL,
                key             TEXT NOT NULL,
                value           TEXT NOT NULL,
                PRIMARY KEY (grp, key)
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Run a query on the blocking pool with the connection locked
    async fn with_conn<T, F>(&self, query: F) -> Result<T, CapabilityError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &str) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let group = self.group.clone();
        tokio::task::spawn_blocking(move || -> Result<T, CapabilityError> {
            let conn = conn.lock().map_err(|_| {
                CapabilityError::InvalidData("preferences connection poisoned".to_string())
            })?;
            Ok(query(&conn, &group)?)
        })
        .await
        .map_err(|e| CapabilityError::InvalidData(format!("preferences task failed: {}", e)))?
    }
}

#[async_trait]
impl Preferences for SqlitePreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        let key = key.to_string();
        self.with_conn(move |conn, group| {
            conn.query_row(
                "SELECT value FROM preferences WHERE grp = ?1 AND key = ?2",
                rusqlite::params![group, key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_conn(move |conn, group| {
            conn.execute(
                "INSERT INTO preferences (grp, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(grp, key) DO UPDATE SET value = excluded.value",
                rusqlite::params![group, key, value],
            )?;
            log::debug!("stored {} bytes under {}.{}", value.len(), group, key);
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), CapabilityError> {
        let key = key.to_string();
        self.with_conn(move |conn, group| {
            conn.execute(
                "DELETE FROM preferences WHERE grp = ?1 AND key = ?2",
                rusqlite::params![group, key],
            )
        })
        .await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CapabilityError> {
        self.with_conn(|conn, group| {
            let mut stmt =
                conn.prepare("SELECT key FROM preferences WHERE grp = ?1 ORDER BY key")?;
            let key_iter = stmt.query_map([group], |row| row.get(0))?;

            let mut keys = Vec::new();
            for key in key_iter {
                keys.push(key?);
            }

            Ok(keys)
        })
        .await
    }

    async fn clear(&self) -> Result<(), CapabilityError> {
        self.with_conn(|conn, group| conn.execute("DELETE FROM preferences WHERE grp = ?1", [group]))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for SqlitePreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePreferences")
            .field("group", &self.group)
            .field("db_path", &self.db_path)
            .finish()
    }
}
