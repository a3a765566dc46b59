//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built at startup and passed down explicitly
//! - Repositories borrow a connection, they never own or open one
//! - Callers own the transaction: begin, attach a repo, commit (drop = rollback)

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::{bootstrap, load_script, DEFAULT_SCHEMA};
pub use sqlx::SqlitePool;
