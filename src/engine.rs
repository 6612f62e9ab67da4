//! Attribution and aggregation entry point
//!
//! The engine keeps no state between calls: every invocation attributes the
//! batch it is handed and rebuilds all summaries from scratch. Filtering and
//! caching belong to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::analytics::{
    summarize_fleet, summarize_hubs, summarize_vendors, top_vendors, FleetKpis, HubSummary,
    VendorSummary, DEFAULT_TOP_N,
};
use crate::attribution::attribute_batch;
use crate::error::Result;
use crate::models::{validate_batch, CsvRecord, EnrichedTripRecord, TripRecord};
use crate::rules::AttributionRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the ranked vendor view
    pub top_n: usize,
    pub rules: AttributionRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            rules: AttributionRules::default(),
        }
    }
}

/// Everything the presentation layer renders for one batch
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kpis: FleetKpis,
    pub hubs: Vec<HubSummary>,
    pub vendors: Vec<VendorSummary>,
    pub top_vendors: Vec<VendorSummary>,
    pub trips: Vec<EnrichedTripRecord>,
}

pub fn summarize(trips: &[TripRecord], config: &EngineConfig) -> Report {
    let _span = info_span!("summarize", trips = trips.len()).entered();

    let enriched = attribute_batch(trips, &config.rules);
    let kpis = summarize_fleet(&enriched);
    let hubs = summarize_hubs(&enriched);
    let vendors = summarize_vendors(&enriched);
    let top = top_vendors(&vendors, config.top_n);

    debug!(
        hubs = hubs.len(),
        vendors = vendors.len(),
        top_n = config.top_n,
        "Report built"
    );

    Report {
        kpis,
        hubs,
        vendors,
        top_vendors: top,
        trips: enriched,
    }
}

/// Validate raw rows first; any missing required field aborts the batch
pub fn summarize_rows(rows: &[CsvRecord], config: &EngineConfig) -> Result<Report> {
    let trips = validate_batch(rows)?;
    Ok(summarize(&trips, config))
}
