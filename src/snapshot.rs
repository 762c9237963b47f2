//! Snapshot store
//!
//! The snapshot is a JSON file mapping VIN to the minimal summary needed
//! for the next run's comparison. The file format matches the original
//! `cars.json` layout. A BTreeMap keeps iteration and the written file
//! deterministic.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Persisted summary for one previously seen vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub vin: String,
    pub price: f64,
    /// Whether the listing had any photos last time we saw it
    pub photos: bool,
}

/// VIN-keyed snapshot of the previous run
pub type Snapshot = BTreeMap<String, SnapshotEntry>;

/// Load the snapshot from disk
///
/// A missing file is an empty snapshot (first run), not an error.
pub fn load(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        log::info!(
            "No snapshot at {}, treating every listing as new",
            path.display()
        );
        return Ok(Snapshot::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&contents)?;
    log::info!(
        "Loaded snapshot with {} vehicle(s) from {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Write the snapshot, fully replacing the previous file
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let contents = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, contents)?;
    log::info!(
        "Saved snapshot with {} vehicle(s) to {}",
        snapshot.len(),
        path.display()
    );
    Ok(())
}
