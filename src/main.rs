//! Car Watch - Used Tesla Inventory Tracker
//!
//! Polls the inventory API, posts Discord alerts for new, changed and
//! delisted cars, and persists a snapshot for the next run. Runs once or
//! continuously on an interval.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

use car_watch::config::{parse_trims, parse_years, WatchConfig};
use car_watch::run::run_once;

/// Used-car watcher - posts Discord alerts for inventory changes
#[derive(Parser, Debug)]
#[command(name = "car_watch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Vehicle model code to search for (e.g. m3)
    #[arg(short, long)]
    model: String,

    /// Comma-separated model years (e.g. 2021,2022)
    #[arg(long)]
    years: String,

    /// Comma-separated trim codes (e.g. LRAWD,PAWD)
    #[arg(long, default_value = "")]
    trims: String,

    /// Market / country code for the inventory search
    #[arg(long, default_value = "GB")]
    market: String,

    /// Discord webhook URL to post notifications to
    #[arg(long)]
    webhook_url: String,

    /// Discord thread id for new-arrival notifications
    #[arg(long)]
    new_thread: String,

    /// Discord thread id for changed/delisted notifications
    #[arg(long)]
    changed_thread: String,

    /// Path to the snapshot file
    #[arg(short, long, default_value_t = default_snapshot_path())]
    snapshot: String,

    /// Run once and exit (default: run continuously with interval checks)
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Check interval in hours when running continuously
    #[arg(long, default_value_t = 1)]
    interval_hours: u64,
}

/// Returns the default snapshot path: ~/.local/share/car_watch/cars.json
fn default_snapshot_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("car_watch")
        .join("cars.json")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let snapshot_path = PathBuf::from(&args.snapshot);

    log::info!("Starting car_watch...");
    log::info!("Snapshot path: {}", snapshot_path.display());

    // Ensure parent directory exists
    if let Some(parent) = snapshot_path.parent() {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create snapshot directory: {}", e);
                std::process::exit(1);
            }
            log::info!("Created directory: {}", parent.display());
        }
    }

    let years = parse_years(&args.years);
    if years.is_empty() {
        log::warn!("No valid years parsed from '{}'", args.years);
    }

    let config = WatchConfig::new(
        args.model,
        years,
        parse_trims(&args.trims),
        args.market,
        args.webhook_url,
        args.new_thread,
        args.changed_thread,
        snapshot_path,
    );

    if args.once {
        run_once(&config).await;
    } else {
        log::info!(
            "Running in daemon mode, checking every {} hour(s)",
            args.interval_hours
        );
        run_daemon(&config, args.interval_hours).await;
    }
}

/// Run the watch daemon - checks the inventory on a fixed interval
async fn run_daemon(config: &WatchConfig, interval_hours: u64) {
    let check_interval = Duration::from_secs(interval_hours * 3600);
    let mut ticker = interval(check_interval);

    loop {
        ticker.tick().await;
        run_once(config).await;
    }
}
