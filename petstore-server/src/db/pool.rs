//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (`sqlite://pets.db`, `sqlite::memory:`)
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database can't be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://petstore.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// An in-memory database lives only as long as its connection, so memory URLs
/// get exactly one connection that is never reaped.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    if is_in_memory(database_url) {
        tracing::debug!("in-memory database, pinning a single connection");
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://pets?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://pets.db"));
    }

    #[tokio::test]
    async fn pool_acquires_connection() {
        let pool = create_pool("sqlite::memory:").await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn memory_database_survives_between_acquires() {
        let pool = create_pool("sqlite::memory:").await.expect("pool creation failed");

        sqlx::query("CREATE TABLE marker (v INTEGER)")
            .execute(&pool)
            .await
            .expect("create failed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM marker")
            .fetch_one(&pool)
            .await
            .expect("table should still exist");
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.db");
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool_with_options(&url, 2).await.expect("pool creation failed");
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();

        assert!(path.exists());
    }
}
