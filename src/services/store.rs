use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;

use crate::models::User;

const KEY_TOKEN: &str = "token";
const KEY_USER: &str = "user";

/// Persistent store for the session token and cached user profile.
///
/// A plain key-value table; the only rule it enforces is that the pair lives
/// and dies together. `load` is all-or-nothing: a token without a parseable
/// user (or the reverse) reads as no credentials at all.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    conn: Arc<Mutex<Connection>>,
}

impl CredentialStore {
    pub async fn open() -> Result<Self> {
        let path = Self::db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = CredentialStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;

        Ok(store)
    }

    /// Create an in-memory store (used for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = CredentialStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn db_path() -> PathBuf {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").expect("HOME not set");
                PathBuf::from(home).join(".local/share")
            });
        data_dir.join("stir").join("stir.db")
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            );",
        )?;

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if version < 1 {
            conn.execute_batch(
                "CREATE TABLE credentials (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                INSERT INTO schema_version (version) VALUES (1);",
            )?;
        }

        Ok(())
    }

    /// Persist the token and user as a unit.
    pub async fn save(&self, token: &str, user: &User) -> Result<()> {
        let conn = self.conn.clone();
        let token = token.to_string();
        let user_json = serde_json::to_string(user).context("Failed to serialize user")?;
        task::spawn_blocking(move || {
            let mut conn = conn.lock().unwrap();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                params![KEY_TOKEN, token],
            )?;
            tx.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                params![KEY_USER, user_json],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await?
    }

    /// The persisted pair, or `None` when either half is missing or invalid.
    pub async fn load(&self) -> Result<Option<(String, User)>> {
        let conn = self.conn.clone();
        task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let mut stmt = conn.prepare("SELECT value FROM credentials WHERE key = ?1")?;
            let token: Option<String> = stmt
                .query_row(params![KEY_TOKEN], |row| row.get(0))
                .optional()?;
            let user_json: Option<String> = stmt
                .query_row(params![KEY_USER], |row| row.get(0))
                .optional()?;

            let (Some(token), Some(user_json)) = (token, user_json) else {
                return Ok(None);
            };
            match serde_json::from_str::<User>(&user_json) {
                Ok(user) => Ok(Some((token, user))),
                Err(e) => {
                    tracing::warn!("discarding unreadable persisted user: {e}");
                    Ok(None)
                }
            }
        })
        .await?
    }

    /// Drop both halves of the pair. Idempotent.
    pub async fn clear(&self) -> Result<()> {
        let conn = self.conn.clone();
        task::spawn_blocking(move || {
            let mut conn = conn.lock().unwrap();
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM credentials WHERE key IN (?1, ?2)",
                params![KEY_TOKEN, KEY_USER],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let store = CredentialStore::open_in_memory().unwrap();
        assert!(store.load().await.unwrap().is_none());

        store.save("tok-1", &test_user()).await.unwrap();
        let (token, user) = store.load().await.unwrap().unwrap();
        assert_eq!(token, "tok-1");
        assert_eq!(user, test_user());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.save("tok-1", &test_user()).await.unwrap();

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_is_all_or_nothing() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.save("tok-1", &test_user()).await.unwrap();

        // Simulate a half-written pair left behind by an older build.
        {
            let conn = store.conn.lock().unwrap();
            conn.execute("DELETE FROM credentials WHERE key = 'user'", [])
                .unwrap();
        }
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unparseable_user_reads_as_absent() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.save("tok-1", &test_user()).await.unwrap();

        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "UPDATE credentials SET value = 'not json' WHERE key = 'user'",
                [],
            )
            .unwrap();
        }
        assert!(store.load().await.unwrap().is_none());
    }
}
