use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use frd_client::client::ApiClient;
use frd_client::params::{Adjustment, BarInterval};
use frd_sync::config;
use frd_sync::db::migrate;
use frd_sync::instrument::{AssetClass, FullRequest};
use frd_sync::scheduler::{Cadence, UpdateScheduler};
use frd_sync::watermark::repo::SqliteWatermarkStore;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "FirstRate Data sync CLI")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "FILE", default_value = "frd.toml")]
    config: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one scheduled update pass across every asset class.
    Run {
        /// Which cadence's watermarks to check.
        #[arg(value_enum)]
        cadence: Cadence,
    },
    /// Bootstrap the complete history for one asset class and range.
    Full {
        /// Asset class to bootstrap.
        #[arg(long, value_enum)]
        class: AssetClass,
        /// Class-specific range: ticker range, ticker/pair/symbol list, or
        /// contract month.
        #[arg(long)]
        scope: String,
        /// Bar interval to request.
        #[arg(long, default_value_t = BarInterval::OneDay)]
        interval: BarInterval,
        /// Corporate-action adjustment, where the class supports one.
        #[arg(long)]
        adjustment: Option<Adjustment>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config_path(&cli.config)?;

    let database_url = cfg.resolve_database_url()?;
    migrate::run_sqlite(&database_url)?;

    let store = Arc::new(SqliteWatermarkStore::open(&database_url)?);
    let client = Arc::new(ApiClient::with_base_url(
        cfg.resolve_userid()?,
        &cfg.base_url,
    )?);
    let scheduler = UpdateScheduler::new(client, store, &cfg.work_dir);

    match cli.cmd {
        Cmd::Run { cadence } => {
            let summary = match cadence {
                Cadence::Daily => scheduler.run_daily(),
                Cadence::Weekly => scheduler.run_weekly(),
                Cadence::Monthly => scheduler.run_monthly(),
            };
            info!(
                cadence = %summary.cadence,
                triggered = summary.triggered.len(),
                skipped = summary.skipped.len(),
                failed = summary.failures.len(),
                "pass finished"
            );
            if summary.has_failures() {
                bail!(
                    "{} handler(s) failed during the {} pass",
                    summary.failures.len(),
                    summary.cadence
                );
            }
        }
        Cmd::Full {
            class,
            scope,
            interval,
            adjustment,
        } => {
            let handler = scheduler
                .handler(class)
                .with_context(|| format!("no handler registered for {class}"))?;
            handler.download_full(&FullRequest {
                scope,
                interval,
                adjustment,
            })?;
        }
    }

    Ok(())
}
