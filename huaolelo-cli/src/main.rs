//! huaolelo CLI - merged Hawaiian-English dictionary server
//!
//! Entry point for the `huaolelo` command-line tool:
//! - `serve` runs the HTTP interface over an ingested dictionary database
//! - `stats` prints the table census to stdout

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use huaolelo_server::db::create_pool;
use huaolelo_server::db::repos::StatsRepo;
use huaolelo_server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "huaolelo",
    author,
    version,
    about = "Browse and search a merged Hawaiian-English dictionary",
    long_about = "HTTP interface over a merged Hawaiian-English dictionary: browse by \
                  letter, full-text search with substring fallback, concordance \
                  sentences, topical indices, and the historical word lists."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print the row count of every table in the dictionary schema
    Stats(StatsArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
struct StatsArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))?;
    Ok(())
}

fn require_database_url(arg: Option<String>) -> Result<String> {
    arg.or_else(|| std::env::var("DATABASE_URL").ok()).context(
        "DATABASE_URL not set. Set via --database-url, the DATABASE_URL env var, or a .env file",
    )
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = require_database_url(args.database_url)?;

    tracing::info!("Starting huaolelo server on {}", args.bind);

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(pool, config).await.context("Server error")?;
    Ok(())
}

async fn run_stats(args: StatsArgs) -> Result<()> {
    let database_url = require_database_url(args.database_url)?;
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let counts = StatsRepo::new(&pool)
        .all_tables()
        .await
        .context("Failed to count tables")?;

    for count in counts {
        println!("{:<24} {}", count.table, count.rows);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env next to the binary or in the working directory is the usual way
    // to carry DATABASE_URL in development.
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => run_serve(args).await?,
        Commands::Stats(args) => run_stats(args).await?,
    }

    Ok(())
}
