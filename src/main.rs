//! CLI entry point for the camsnap tool.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use camsnap_core::{Credentials, FileStore, Scheduler, SessionClient, SessionConfig};
use clap::Parser;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!(
        url = %args.url,
        user = %args.user,
        path = %args.path.display(),
        interval = %humantime::format_duration(args.interval),
        "camsnap starting"
    );

    let config = SessionConfig::new(args.url, Credentials::new(args.user, args.pass))
        .with_timeouts(
            Duration::from_secs(args.connect_timeout),
            Duration::from_secs(args.request_timeout),
        );
    let session = SessionClient::new(config).context("failed to set up camera session")?;
    let store = Arc::new(FileStore::new(args.path));

    let mut scheduler =
        Scheduler::new(session, store, args.interval).context("failed to set up scheduler")?;

    scheduler
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "cannot listen for Ctrl-C; polling until killed");
                std::future::pending::<()>().await;
            }
            info!("Ctrl-C received, stopping");
        })
        .await;

    Ok(())
}
