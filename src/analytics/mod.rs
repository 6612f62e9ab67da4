//! Batch reductions over attributed trips
//!
//! All three views fold records into [`Tally`] counters, so shard results
//! can be merged in any order before rates are derived.

pub mod hub;
pub mod kpi;
pub mod tally;
pub mod vendor;

pub use hub::{summarize_hubs, HubSummary};
pub use kpi::{summarize_fleet, FleetKpis, OwnershipBreakdown};
pub use tally::Tally;
pub use vendor::{summarize_vendors, top_vendors, VendorSummary, DEFAULT_TOP_N};
