//! Welcome endpoint

use axum::{routing::get, Router};

pub const WELCOME: &str = "Welcome to the petstore API! Pets live under /api/pets.";

/// GET /
async fn index() -> &'static str {
    WELCOME
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
