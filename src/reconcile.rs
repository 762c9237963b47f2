//! Reconciliation of current listings against the previous snapshot
//!
//! Classifies every vehicle into new, changed, unchanged or missing and
//! computes the deltas the notifier reports. Pure functions, total over
//! any input: an absent snapshot entry or an absent listing is a valid
//! classification input, never an error.

use std::collections::HashSet;

use crate::snapshot::{Snapshot, SnapshotEntry};
use crate::tesla::Listing;

/// A listing annotated with its classification against the snapshot
///
/// Exactly one of `is_new`, `missing` or "matched an existing entry"
/// describes each record. `price_changed` and `photos_added` are only
/// ever set on matched records.
#[derive(Debug, Clone)]
pub struct ReconciledCar {
    pub listing: Listing,
    /// VIN was not in the snapshot
    pub is_new: bool,
    /// Price differs from the snapshot
    pub price_changed: bool,
    /// Signed delta, current minus previous; meaningful only when
    /// `price_changed` is set
    pub price_change: f64,
    /// Listing went from no photos to at least one. The reverse
    /// transition is deliberately not detected.
    pub photos_added: bool,
    /// VIN was in the snapshot but absent from the current fetch;
    /// the listing is a stand-in carrying only VIN and last price
    pub missing: bool,
}

impl ReconciledCar {
    /// Whether this record changed since the last run
    pub fn changed(&self) -> bool {
        self.price_changed || self.photos_added
    }

    fn matched(listing: Listing, previous: &SnapshotEntry) -> Self {
        let price_changed = listing.price != previous.price;
        let price_change = if price_changed {
            listing.price - previous.price
        } else {
            0.0
        };
        let photos_added = listing.has_photos() && !previous.photos;
        Self {
            listing,
            is_new: false,
            price_changed,
            price_change,
            photos_added,
            missing: false,
        }
    }

    fn new_arrival(listing: Listing) -> Self {
        Self {
            listing,
            is_new: true,
            price_changed: false,
            price_change: 0.0,
            photos_added: false,
            missing: false,
        }
    }

    fn vanished(vin: &str, last_price: f64) -> Self {
        let listing = Listing {
            vin: vin.to_string(),
            price: last_price,
            ..Listing::default()
        };
        Self {
            listing,
            is_new: false,
            price_changed: false,
            price_change: 0.0,
            photos_added: false,
            missing: true,
        }
    }
}

/// Classify every current listing against the snapshot and synthesize a
/// stand-in for each vehicle that disappeared.
///
/// Output order: current listings in fetch order, then missing records
/// in VIN order. Duplicate VINs in the fetch are classified
/// independently, each against the same snapshot entry.
pub fn reconcile(current: Vec<Listing>, snapshot: &Snapshot) -> Vec<ReconciledCar> {
    let seen: HashSet<String> = current.iter().map(|l| l.vin.clone()).collect();

    let mut reconciled: Vec<ReconciledCar> = current
        .into_iter()
        .map(|listing| match snapshot.get(&listing.vin) {
            Some(previous) => ReconciledCar::matched(listing, previous),
            None => ReconciledCar::new_arrival(listing),
        })
        .collect();

    for (vin, entry) in snapshot {
        if !seen.contains(vin) {
            reconciled.push(ReconciledCar::vanished(vin, entry.price));
        }
    }

    reconciled
}

/// Build the next snapshot from the reconciled records
///
/// Missing records are dropped: once gone, a vehicle is forgotten rather
/// than carried forward. Duplicate VINs resolve last-wins.
pub fn build_snapshot(reconciled: &[ReconciledCar]) -> Snapshot {
    reconciled
        .iter()
        .filter(|car| !car.missing)
        .map(|car| {
            (
                car.listing.vin.clone(),
                SnapshotEntry {
                    vin: car.listing.vin.clone(),
                    price: car.listing.price,
                    photos: car.listing.has_photos(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
