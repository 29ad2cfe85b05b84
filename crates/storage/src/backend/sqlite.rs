#![forbid(unsafe_code)]

use super::Backend;
use crate::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE_NAME: &str = "orbit.db";
const SCHEMA_VERSION: &str = "v1";

/// One row per collection; a `put` is a single upsert statement, so a
/// collection rewrite is either fully visible or not at all.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteBackend {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let conn = Connection::open(Self::db_path(&storage_dir))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        install_schema(&conn)?;

        log::info!("opened sqlite store at {}", storage_dir.display());
        Ok(Self { conn, storage_dir })
    }

    pub fn db_path(storage_dir: &Path) -> PathBuf {
        storage_dir.join(DB_FILE_NAME)
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS collections (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}

impl Backend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM collections WHERE key=?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO collections(key, value, updated_at_ms) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at_ms=excluded.updated_at_ms",
            params![key, value, orbit_core::time::wall_clock_ms()],
        )?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM collections ORDER BY key ASC")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(row.get::<_, String>(0)?);
        }
        Ok(out)
    }
}
