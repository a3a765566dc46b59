//! Pet repository
//!
//! Plain CRUD over the `pets` table. Update and delete on an unknown id are
//! no-ops, the same as the SQL they run.

use sqlx::SqliteConnection;

use super::DbError;
use crate::models::Pet;

/// Pet repository, attached to a borrowed connection
pub struct PetRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PetRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List all pets, ordered by id.
    pub async fn list(&mut self) -> Result<Vec<Pet>, DbError> {
        let pets: Vec<Pet> = sqlx::query_as("SELECT id, name FROM pets ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(pets)
    }

    /// Find a pet by id.
    ///
    /// Returns None if no row matches.
    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Pet>, DbError> {
        let pet: Option<Pet> = sqlx::query_as("SELECT id, name FROM pets WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(pet)
    }

    /// Insert a new pet and return the generated key.
    ///
    /// Any id already set on `pet` is ignored.
    pub async fn insert(&mut self, pet: &Pet) -> Result<i64, DbError> {
        let result = sqlx::query("INSERT INTO pets (name) VALUES (?)")
            .bind(&pet.name)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Rename a pet by id.
    pub async fn update(&mut self, pet: &Pet) -> Result<(), DbError> {
        let id = pet.id.ok_or(DbError::MissingId { resource: "pet" })?;

        let result = sqlx::query("UPDATE pets SET name = ? WHERE id = ?")
            .bind(&pet.name)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "update matched no pet");
        }
        Ok(())
    }

    /// Delete a pet by id (idempotent).
    pub async fn delete_by_id(&mut self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "delete matched no pet");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{bootstrap, create_pool, DEFAULT_SCHEMA};
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.expect("pool");
        bootstrap(&pool, DEFAULT_SCHEMA).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn list_empty_table() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let pets = PetRepo::new(&mut conn).list().await.unwrap();
        assert!(pets.is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetRepo::new(&mut conn);

        let first = repo.insert(&Pet::new("Oliver")).await.unwrap();
        let second = repo.insert(&Pet::new("Jemima")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let pets = repo.list().await.unwrap();
        assert_eq!(
            pets,
            vec![Pet::new("Oliver").with_id(1), Pet::new("Jemima").with_id(2)]
        );
    }

    #[tokio::test]
    async fn insert_ignores_client_id() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetRepo::new(&mut conn);

        let id = repo.insert(&Pet::new("Oliver").with_id(42)).await.unwrap();
        assert_eq!(id, 1);
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_id_missing_is_none() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let pet = PetRepo::new(&mut conn).find_by_id(7).await.unwrap();
        assert!(pet.is_none());
    }

    #[tokio::test]
    async fn update_renames_in_place() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetRepo::new(&mut conn);

        let id = repo.insert(&Pet::new("Oliver")).await.unwrap();
        let renamed = Pet::new("Jemima").with_id(id);
        repo.update(&renamed).await.unwrap();
        repo.update(&renamed).await.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(renamed));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_is_silent() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetRepo::new(&mut conn);

        repo.update(&Pet::new("Ghost").with_id(99)).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let err = PetRepo::new(&mut conn)
            .update(&Pet::new("Nameless"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::MissingId { resource: "pet" }));
    }

    #[tokio::test]
    async fn delete_then_find() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetRepo::new(&mut conn);

        let id = repo.insert(&Pet::new("Oliver")).await.unwrap();
        repo.delete_by_id(id).await.unwrap();
        repo.delete_by_id(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn committed_transaction_persists() {
        let pool = test_pool().await;

        let mut tx = pool.begin().await.unwrap();
        PetRepo::new(&mut tx).insert(&Pet::new("Oliver")).await.unwrap();
        tx.commit().await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(PetRepo::new(&mut conn).list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let pool = test_pool().await;

        {
            let mut tx = pool.begin().await.unwrap();
            PetRepo::new(&mut tx).insert(&Pet::new("Ghost")).await.unwrap();
        }

        let mut conn = pool.acquire().await.unwrap();
        assert!(PetRepo::new(&mut conn).list().await.unwrap().is_empty());
    }
}
