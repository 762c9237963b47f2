//! Run orchestration
//!
//! A run is strictly sequential: fetch, reconcile, dispatch one record at
//! a time, then persist. Every failure is logged and recovered locally;
//! nothing here aborts the process. The snapshot write is an
//! all-or-nothing run-level commit: it only happens when every dispatch
//! succeeded, so a vehicle is never marked seen when its notification
//! did not actually go out.

use crate::config::WatchConfig;
use crate::discord::Notifier;
use crate::reconcile::{build_snapshot, reconcile};
use crate::snapshot::{self, Snapshot};
use crate::tesla;

/// Outcome of a single watch run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Listings returned by the inventory fetch
    pub fetched: usize,
    /// Records classified as new arrivals
    pub new_listings: usize,
    /// Records with a price change or added photos
    pub changed: usize,
    /// Vehicles present in the snapshot but absent from the fetch
    pub missing: usize,
    /// Notifications actually sent
    pub notified: usize,
    /// Dispatch failures
    pub failures: usize,
    /// Whether the new snapshot was written
    pub persisted: bool,
}

/// Execute one fetch / reconcile / notify / persist cycle
pub async fn run_once(config: &WatchConfig) -> RunSummary {
    let mut summary = RunSummary::default();

    let previous = match snapshot::load(&config.snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to load snapshot: {}", e);
            Snapshot::new()
        }
    };

    let inventory = match tesla::fetch_inventory(&config.inventory_url, config).await {
        Ok(listings) => listings,
        Err(e) => {
            log::error!("Failed to fetch inventory: {}", e);
            log::warn!(
                "Continuing with an empty inventory; every previously seen \
                 vehicle will be reported as no longer listed"
            );
            Vec::new()
        }
    };
    summary.fetched = inventory.len();

    let reconciled = reconcile(inventory, &previous);
    summary.new_listings = reconciled.iter().filter(|c| c.is_new).count();
    summary.changed = reconciled.iter().filter(|c| c.changed()).count();
    summary.missing = reconciled.iter().filter(|c| c.missing).count();

    let notifier = Notifier::new(config);
    for car in &reconciled {
        match notifier.dispatch(car).await {
            Ok(true) => summary.notified += 1,
            Ok(false) => {}
            Err(e) => {
                log::error!("Failed to send {} to Discord: {}", car.listing.vin, e);
                summary.failures += 1;
            }
        }
    }

    if summary.failures == 0 {
        let next = build_snapshot(&reconciled);
        match snapshot::save(&config.snapshot_path, &next) {
            Ok(()) => summary.persisted = true,
            Err(e) => log::error!("Failed to save snapshot: {}", e),
        }
    } else {
        log::warn!(
            "{} notification(s) failed, keeping the previous snapshot",
            summary.failures
        );
    }

    log::info!(
        "Run complete: {} fetched, {} new, {} changed, {} missing, {} sent, {} failed",
        summary.fetched,
        summary.new_listings,
        summary.changed,
        summary.missing,
        summary.notified,
        summary.failures
    );

    summary
}
