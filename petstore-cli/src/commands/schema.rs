//! Schema command
//!
//! Runs the bootstrap script against the configured database without
//! starting the server, or prints it with `--print`.

use anyhow::{Context, Result};
use clap::Parser;

use petstore_server::db::bootstrap;

use crate::config::{DatabaseArgs, PetstoreConfig};

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Print the script instead of running it
    #[arg(long)]
    pub print: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Apply (or print) the schema script
pub async fn run_schema(args: SchemaArgs, config: &PetstoreConfig) -> Result<()> {
    let database = args.database.resolve(config);
    let script = database.schema_script()?;

    if args.print {
        print!("{}", script);
        return Ok(());
    }

    let pool = database.connect().await?;
    bootstrap(&pool, &script)
        .await
        .with_context(|| format!("Schema bootstrap failed for {}", database.url))?;
    pool.close().await;

    println!("Schema applied to {}", database.url);
    Ok(())
}
