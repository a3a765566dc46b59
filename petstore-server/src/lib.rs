//! petstore-server: CRUD HTTP service over a single `pets` table
//!
//! Each request runs one repository call inside one SQLite transaction.
//! The binary lives in `petstore-cli`; this crate is the library it drives.

pub mod db;
pub mod http;
pub mod models;

pub use db::repos::{DbError, PetRepo};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Pet, ValidationError};
