//! Car Watch - Used Tesla Inventory Tracker
//!
//! Polls the Tesla used-vehicle inventory API, diffs the results against
//! the snapshot saved by the previous run, and posts Discord webhook
//! notifications for new, changed and delisted cars.

pub mod config;
pub mod discord;
pub mod error;
pub mod reconcile;
pub mod run;
pub mod snapshot;
pub mod tesla;

pub use config::WatchConfig;
pub use error::{Result, WatchError};
pub use reconcile::{build_snapshot, reconcile, ReconciledCar};
pub use run::{run_once, RunSummary};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use tesla::Listing;
