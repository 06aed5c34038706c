//! CLI binary for sheet2json.
//!
//! A thin shim over the library crate that maps CLI flags and the `PORT`
//! environment variable to a `ServiceConfig` and runs the server.

use anyhow::{Context, Result};
use clap::Parser;
use sheet2json::{serve, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sheet2json",
    version,
    about = "Serve remote Excel/CSV spreadsheets as paginated JSON over HTTP",
    long_about = "Starts an HTTP server with two routes:\n\
                  \n  GET /health\n  GET /api/data?url=<spreadsheet url>&page=<n>&rows_per_page=<n>\n\
                  \nThe spreadsheet is fetched per request, parsed, and one page of rows\n\
                  is returned as JSON. Nothing is cached between requests."
)]
struct Cli {
    /// TCP port to listen on (PORT env var takes effect when the flag is
    /// not given).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Timeout for the outbound spreadsheet download, in seconds.
    #[arg(long, default_value_t = 30)]
    fetch_timeout: u64,

    /// Page size used when a request omits rows_per_page.
    #[arg(long, default_value_t = 100)]
    default_rows_per_page: u64,

    /// Suppress startup log lines (errors are still logged).
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::builder()
        .port(cli.port)
        .fetch_timeout_secs(cli.fetch_timeout)
        .default_rows_per_page(cli.default_rows_per_page)
        .build()
        .context("Invalid configuration")?;

    serve(config)
        .await
        .context("Server terminated unexpectedly")
}
