use anyhow::Result;
use std::time::Duration;
use tokio::time;

mod config;
mod scanner;
mod snapshot;
mod source;

use config::ScannerConfig;
use scanner::{log_outcome, write_outcome, WatchlistScanner};
use source::FileSnapshotSource;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    let config = ScannerConfig::from_env()?;

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting watchlist signal scanner");
    tracing::info!("  Snapshots: {}", config.snapshot_path.display());
    tracing::info!("  Scan interval: {} seconds", config.scan_interval_seconds);
    if let Some(path) = &config.report_output_path {
        tracing::info!("  Reports: {}", path.display());
    }

    // 2. Build scanner
    let scanner = WatchlistScanner::new(FileSnapshotSource::new(config.snapshot_path.clone()));

    if config.run_once {
        return run_cycle(&scanner, &config).await;
    }

    // 3. Poll until Ctrl+C
    let mut interval = time::interval(Duration::from_secs(config.scan_interval_seconds));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = run_cycle(&scanner, &config).await {
                    tracing::error!("Error in scan cycle: {:#}", e);
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Received SIGINT, shutting down");
                break;
            }
        }
    }

    Ok(())
}

async fn run_cycle(scanner: &WatchlistScanner<FileSnapshotSource>, config: &ScannerConfig) -> Result<()> {
    let outcome = scanner.scan(chrono::Utc::now()).await?;
    tracing::info!(
        "Scored {} instruments ({} rejected, {})",
        outcome.reports.len(),
        outcome.rejected.len(),
        if outcome.regular_session { "regular session" } else { "outside regular session" }
    );

    match &config.report_output_path {
        Some(path) => write_outcome(path, &outcome).await?,
        None => log_outcome(&outcome),
    }

    Ok(())
}
