//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows `&mut SqliteConnection`, so it works on a transaction or a bare connection
//! - One async fn per SQL statement, typed arguments in, typed result out
//! - Parameters are always bound, never formatted into SQL

pub mod pets;

pub use pets::PetRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} has no id")]
    MissingId { resource: &'static str },
}
