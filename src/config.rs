//! Run configuration
//!
//! One immutable struct built at startup and passed into the run function.

use std::path::PathBuf;

use crate::tesla::INVENTORY_URL;

/// Configuration for a watch run
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Vehicle model code (e.g. "m3")
    pub model: String,
    /// Model years to search for
    pub years: Vec<i32>,
    /// Trim codes to search for
    pub trims: Vec<String>,
    /// Market / country code (e.g. "GB")
    pub market: String,
    /// Inventory API endpoint
    pub inventory_url: String,
    /// Discord webhook URL
    pub webhook_url: String,
    /// Thread id for new-arrival notifications
    pub new_thread_id: String,
    /// Thread id for changed/delisted notifications
    pub changed_thread_id: String,
    /// Path to the snapshot file
    pub snapshot_path: PathBuf,
}

impl WatchConfig {
    /// Build a config with the production inventory endpoint
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: String,
        years: Vec<i32>,
        trims: Vec<String>,
        market: String,
        webhook_url: String,
        new_thread_id: String,
        changed_thread_id: String,
        snapshot_path: PathBuf,
    ) -> Self {
        Self {
            model,
            years,
            trims,
            market,
            inventory_url: INVENTORY_URL.to_string(),
            webhook_url,
            new_thread_id,
            changed_thread_id,
            snapshot_path,
        }
    }
}

/// Parse a comma-separated list of years
///
/// Malformed values are logged and skipped, not fatal.
pub fn parse_years(raw: &str) -> Vec<i32> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<i32>() {
            Ok(year) => Some(year),
            Err(e) => {
                log::warn!("Skipping malformed year '{}': {}", s, e);
                None
            }
        })
        .collect()
}

/// Parse a comma-separated list of trim codes
pub fn parse_trims(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
