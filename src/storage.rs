//! User storage module
//!
//! Owns the SQLite connection pool and exposes the three operations the
//! rest of the service needs: list, add, delete. The store assigns ids;
//! callers never do.

use crate::error::StorageError;
use crate::logger;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT, surname TEXT)";

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// Durable storage of `User` records.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Open the database at `path`, creating the file and the `users`
    /// table when they do not exist yet.
    pub async fn connect(path: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(StorageError::Connect)?;

        Ok(Self { pool })
    }

    /// All users, ordered by ascending id. An empty table yields an
    /// empty vec, not an error.
    pub async fn read_users(&self) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query("SELECT id, name, surname FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Query)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(User {
                id: row.try_get("id").map_err(StorageError::Query)?,
                name: row.try_get("name").map_err(StorageError::Query)?,
                surname: row.try_get("surname").map_err(StorageError::Query)?,
            });
        }
        Ok(users)
    }

    /// Insert a new record; SQLite assigns the id. Empty strings are
    /// accepted as valid values.
    pub async fn add_user(&self, name: &str, surname: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO users (name, surname) VALUES (?, ?)")
            .bind(name)
            .bind(surname)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Query)?;
        Ok(())
    }

    /// Delete the row whose id matches the given token. The token comes
    /// straight from the route, so it is parsed here against the store's
    /// own id type; a token that is not a valid id matches no row, which
    /// makes the operation a no-op success, same as deleting an id that
    /// was already removed.
    pub async fn delete_user(&self, id: &str) -> Result<(), StorageError> {
        let Ok(id) = id.parse::<i64>() else {
            logger::log_warning(&format!("Delete request with non-numeric id '{id}' ignored"));
            return Ok(());
        };

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Query)?;
        Ok(())
    }

    /// Release the pool. Called once at process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn temp_store() -> (TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let store = UserStore::connect(path.to_str().unwrap()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (_dir, store) = temp_store().await;
        assert_eq!(store.read_users().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_add_then_read() {
        let (_dir, store) = temp_store().await;
        store.add_user("Ada", "Lovelace").await.unwrap();

        let users = store.read_users().await.unwrap();
        assert_eq!(
            users,
            vec![User {
                id: 1,
                name: "Ada".to_string(),
                surname: "Lovelace".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_ordered_by_ascending_id() {
        let (_dir, store) = temp_store().await;
        store.add_user("Ada", "Lovelace").await.unwrap();
        store.add_user("Alan", "Turing").await.unwrap();
        store.add_user("Grace", "Hopper").await.unwrap();

        let users = store.read_users().await.unwrap();
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Alan", "Grace"]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_record() {
        let (_dir, store) = temp_store().await;
        store.add_user("Ada", "Lovelace").await.unwrap();
        store.add_user("Alan", "Turing").await.unwrap();

        store.delete_user("1").await.unwrap();

        let users = store.read_users().await.unwrap();
        assert_eq!(
            users,
            vec![User {
                id: 2,
                name: "Alan".to_string(),
                surname: "Turing".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (_dir, store) = temp_store().await;
        store.add_user("Ada", "Lovelace").await.unwrap();

        let before = store.read_users().await.unwrap();
        store.delete_user("42").await.unwrap();
        let after = store.read_users().await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_delete_non_numeric_id_is_noop() {
        let (_dir, store) = temp_store().await;
        store.add_user("Ada", "Lovelace").await.unwrap();

        store.delete_user("not-a-number").await.unwrap();
        assert_eq!(store.read_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_strings_are_accepted() {
        let (_dir, store) = temp_store().await;
        store.add_user("", "").await.unwrap();

        let users = store.read_users().await.unwrap();
        assert_eq!(users[0].name, "");
        assert_eq!(users[0].surname, "");
    }

    #[tokio::test]
    async fn test_closed_pool_reports_storage_error() {
        let (_dir, store) = temp_store().await;
        store.close().await;

        assert!(store.read_users().await.is_err());
        assert!(store.add_user("Ada", "Lovelace").await.is_err());
        assert!(store.delete_user("1").await.is_err());
    }
}
