//! Mother hub performance and root cause table

use serde::Serialize;
use tracing::debug;

use super::tally::{group_by, Tally};
use crate::models::EnrichedTripRecord;
use crate::percent::Percent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSummary {
    pub hub: String,
    pub total: u64,
    pub plan_success_rate: Percent,
    pub adhoc_vendor: u64,
    pub adhoc_operator: u64,
    pub cancel_vendor: u64,
    pub cancel_operator: u64,
    pub vehicle_compliance: Percent,
}

impl HubSummary {
    pub fn from_tally(hub: impl Into<String>, t: &Tally) -> Self {
        Self {
            hub: hub.into(),
            total: t.total,
            plan_success_rate: Percent::of(t.completed_planned, t.planned),
            adhoc_vendor: t.adhoc_vendor,
            adhoc_operator: t.adhoc_operator,
            cancel_vendor: t.cancel_vendor,
            cancel_operator: t.cancel_operator,
            vehicle_compliance: Percent::of(t.vehicle_matches, t.total),
        }
    }
}

/// One row per source hub, busiest first, ties by hub name
pub fn summarize_hubs(records: &[EnrichedTripRecord]) -> Vec<HubSummary> {
    let groups = group_by(records, |r| r.trip.source_hub.as_str());
    debug!(hubs = groups.len(), records = records.len(), "Grouped trips by hub");

    let mut rows: Vec<HubSummary> = groups
        .iter()
        .map(|(hub, t)| HubSummary::from_tally(hub.as_str(), t))
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.hub.cmp(&b.hub)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::tests::sample_batch;
    use crate::models::BillingBasis;

    #[test]
    fn test_hub_rows() {
        let rows = summarize_hubs(&sample_batch());
        assert_eq!(rows.len(), 2);

        let bhiwandi = &rows[0];
        assert_eq!(bhiwandi.hub, "Bhiwandi MH");
        assert_eq!(bhiwandi.total, 5);
        assert_eq!(bhiwandi.plan_success_rate.to_string(), "33.3%");
        assert_eq!((bhiwandi.adhoc_vendor, bhiwandi.adhoc_operator), (1, 1));
        assert_eq!((bhiwandi.cancel_vendor, bhiwandi.cancel_operator), (1, 1));
        assert_eq!(bhiwandi.vehicle_compliance.to_string(), "80.0%");

        let hoskote = &rows[1];
        assert_eq!(hoskote.hub, "Hoskote MH");
        assert_eq!(hoskote.total, 3);
        assert_eq!(hoskote.plan_success_rate.to_string(), "0.0%");
        assert_eq!((hoskote.cancel_vendor, hoskote.cancel_operator), (0, 1));
        assert_eq!(hoskote.vehicle_compliance.to_string(), "66.7%");
    }

    #[test]
    fn test_partition_covers_batch() {
        let batch = sample_batch();
        let rows = summarize_hubs(&batch);
        let sum: u64 = rows.iter().map(|r| r.total).sum();
        assert_eq!(sum, batch.len() as u64);
    }

    #[test]
    fn test_adhoc_owner_counts_match_adhoc_trips() {
        let batch = sample_batch();
        for row in summarize_hubs(&batch) {
            let adhocs = batch
                .iter()
                .filter(|r| r.trip.source_hub == row.hub && r.trip.billing_basis == BillingBasis::Adhoc)
                .count() as u64;
            assert_eq!(row.adhoc_vendor + row.adhoc_operator, adhocs);
        }
    }

    #[test]
    fn test_hub_without_planned_trips_has_zero_success_rate() {
        let batch: Vec<_> = sample_batch()
            .into_iter()
            .filter(|r| r.trip.billing_basis == BillingBasis::Adhoc)
            .collect();
        for row in summarize_hubs(&batch) {
            assert_eq!(row.plan_success_rate.value(), 0.0);
            assert_eq!(row.plan_success_rate.to_string(), "0.0%");
        }
    }

    #[test]
    fn test_equal_totals_sorted_by_name() {
        let batch: Vec<_> = sample_batch()
            .into_iter()
            .filter(|r| r.trip.trip_code != "MT-0" && r.trip.trip_code != "MT-1")
            .collect();
        let rows = summarize_hubs(&batch);
        assert_eq!(rows[0].total, rows[1].total);
        assert_eq!(rows[0].hub, "Bhiwandi MH");
        assert_eq!(rows[1].hub, "Hoskote MH");
    }

    #[test]
    fn test_empty_group_does_not_panic() {
        let row = HubSummary::from_tally("Empty MH", &Tally::default());
        assert_eq!(row.total, 0);
        assert_eq!(row.vehicle_compliance.to_string(), "0.0%");
        assert_eq!(row.plan_success_rate.to_string(), "0.0%");
        assert!(summarize_hubs(&[]).is_empty());
    }
}
