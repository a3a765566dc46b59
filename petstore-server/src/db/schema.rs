//! Schema bootstrap
//!
//! A single SQL script executed once when the process starts. The script can
//! hold several statements; it runs unprepared through `raw_sql`.

use std::path::Path;

use sqlx::SqlitePool;

use super::DbError;

/// Built-in script, used when no schema file is configured.
pub const DEFAULT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pets (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
"#;

/// Read the schema script from `path`, or fall back to [`DEFAULT_SCHEMA`].
pub fn load_script(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => Ok(DEFAULT_SCHEMA.to_owned()),
    }
}

/// Run the schema script against the pool.
pub async fn bootstrap(pool: &SqlitePool, script: &str) -> Result<(), DbError> {
    tracing::info!("Running schema bootstrap...");

    sqlx::raw_sql(script).execute(pool).await?;

    tracing::info!("Schema bootstrap complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[test]
    fn falls_back_to_builtin_script() {
        let script = load_script(None).unwrap();
        assert!(script.contains("CREATE TABLE IF NOT EXISTS pets"));
    }

    #[test]
    fn reads_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        std::fs::write(&path, "CREATE TABLE pets (id INTEGER PRIMARY KEY, name TEXT);").unwrap();

        let script = load_script(Some(&path)).unwrap();
        assert!(script.starts_with("CREATE TABLE pets"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_script(Some(&dir.path().join("nope.sql"))).is_err());
    }

    #[tokio::test]
    async fn builtin_script_is_idempotent() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        bootstrap(&pool, DEFAULT_SCHEMA).await.unwrap();
        bootstrap(&pool, DEFAULT_SCHEMA).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn runs_multi_statement_scripts() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let script = r#"
            CREATE TABLE pets (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);
            INSERT INTO pets (name) VALUES ('Seed');
        "#;

        bootstrap(&pool, script).await.unwrap();

        let name: (String,) = sqlx::query_as("SELECT name FROM pets WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name.0, "Seed");
    }

    #[tokio::test]
    async fn broken_script_is_an_error() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let err = bootstrap(&pool, "CREATE TABLE (").await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
