//! CLI entry point for savetv-dl.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use savetv_core::{
    Credentials, HttpClient, Ledger, NoopReporter, Pipeline, ProgressReporter, SaveTvClient,
    TerminalReporter,
};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(args.log_level());

    debug!(
        user = %args.user,
        directory = %args.directory.display(),
        remove = args.remove,
        "CLI arguments parsed"
    );

    let config = args.to_config();
    let credentials = Credentials::new(args.user, args.password);

    let progress: Arc<dyn ProgressReporter> = if config.show_progress && io::stderr().is_terminal()
    {
        Arc::new(TerminalReporter::new())
    } else {
        Arc::new(NoopReporter)
    };

    let api = SaveTvClient::new(config.api.clone()).context("failed to build API client")?;
    let fetcher =
        HttpClient::with_progress(&config, progress).context("failed to build video client")?;
    let ledger_path = config.ledger_path();
    let ledger = Ledger::open(&ledger_path)
        .await
        .with_context(|| format!("failed to open ledger at {}", ledger_path.display()))?;

    let pipeline = Pipeline::new(&api, &fetcher, &ledger, config.work_dir.clone());
    let outcome = pipeline.run(&credentials).await;
    let archived = ledger.count().await.ok();
    ledger.close().await;

    match outcome {
        Ok(summary) => {
            info!(
                archived,
                total = summary.total,
                downloaded = summary.downloaded,
                already_downloaded = summary.already_downloaded,
                no_ad_free = summary.no_ad_free,
                removed = summary.removed,
                failed = summary.failed,
                "Archive run complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Archive run aborted");
            Err(e.into())
        }
    }
}
