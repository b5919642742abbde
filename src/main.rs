//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `search_digest` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C cancellation
//! - Printing the result as JSON
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::process;
use tokio_util::sync::CancellationToken;

use search_digest::initialization::init_logger_with;
use search_digest::{run_search, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), falling back
    // to a .env next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling search");
                cancel.cancel();
            }
        });
    }

    match run_search(&config, &opt.query, &cancel).await {
        Ok(report) => {
            info!(
                "Search finished in {:.1}s (cache: {:?})",
                report.elapsed_seconds, report.cache_status
            );
            let json = serde_json::to_string_pretty(&report.result)
                .context("Failed to serialize result")?;
            println!("{}", json);
            if report.result.is_error() {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("search_digest error: {:#}", e);
            process::exit(1);
        }
    }
}
