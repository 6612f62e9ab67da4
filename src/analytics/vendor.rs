//! Vendor failure contribution

use serde::Serialize;

use super::tally::group_by;
use crate::models::EnrichedTripRecord;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorSummary {
    pub vendor: String,
    pub adhocs: u64,
    pub cancellations: u64,
    pub total_failures: u64,
}

/// One row per vendor, ordered by vendor name
pub fn summarize_vendors(records: &[EnrichedTripRecord]) -> Vec<VendorSummary> {
    group_by(records, |r| r.trip.vendor.as_str())
        .into_iter()
        .map(|(vendor, t)| VendorSummary {
            vendor,
            adhocs: t.adhoc,
            cancellations: t.cancelled,
            total_failures: t.adhoc + t.cancelled,
        })
        .collect()
}

/// The `n` vendors with the most failures, ties by vendor name
pub fn top_vendors(vendors: &[VendorSummary], n: usize) -> Vec<VendorSummary> {
    let mut ranked = vendors.to_vec();
    ranked.sort_by(|a, b| {
        b.total_failures
            .cmp(&a.total_failures)
            .then_with(|| a.vendor.cmp(&b.vendor))
    });
    ranked.truncate(n);
    ranked
}
