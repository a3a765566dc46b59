//! HTTP server command
//!
//! Opens the pool, runs the schema script once, then serves the pet API
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use petstore_server::db::bootstrap;
use petstore_server::http::{run_server, ServerConfig};

use crate::config::{DatabaseArgs, PetstoreConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "PETSTORE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self, config: &PetstoreConfig) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind_addr: self
                .bind
                .or(config.server.bind)
                .unwrap_or(defaults.bind_addr),
            cors_permissive: self.cors_permissive
                || config.server.cors_permissive.unwrap_or(defaults.cors_permissive),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &PetstoreConfig) -> Result<()> {
    let server_config = args.server_config(config);
    let database = args.database.resolve(config);

    tracing::info!(
        bind = %server_config.bind_addr,
        database = %database.url,
        "Starting petstore server"
    );

    let script = database.schema_script()?;
    let pool = database.connect().await?;
    bootstrap(&pool, &script)
        .await
        .context("Schema bootstrap failed")?;

    // Run server (blocks until shutdown)
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
