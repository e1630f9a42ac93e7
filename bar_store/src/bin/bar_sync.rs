use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bar_store::{db, ingest, registry::ConnectorRegistry, store::BarStore};

#[derive(Parser)]
#[command(version, about = "Crypto bar ingestion CLI")]
struct Cli {
    /// SQLite database file (defaults to $ALERT_DB_PATH, then ./alert.db).
    #[arg(long, value_name = "FILE", global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create or upgrade the database schema.
    Migrate,
    /// Run one ingestion cycle over the enabled tracked markets.
    Sync {
        /// Fetch bars with close_ts at or after this epoch-second cursor,
        /// overriding per-market watermarks.
        #[arg(long)]
        since_ts: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let db_path = cli.db_path.unwrap_or_else(db::resolve_db_path);

    match cli.cmd {
        Cmd::Migrate => {
            db::migrate::run_sqlite(&db_path)?;
            println!("database ready at {}", db_path.display());
        }
        Cmd::Sync { since_ts } => {
            db::migrate::run_sqlite(&db_path)?;
            let store = BarStore::open(db_path);
            let registry = ConnectorRegistry::with_defaults()?;
            let written = ingest::sync_tracked_tokens(&store, &registry, since_ts).await?;
            println!("{written} bars ingested");
        }
    }

    Ok(())
}
