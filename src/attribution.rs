//! Per-record fault attribution
//!
//! Each trip is classified from its own fields only, so records can be
//! attributed in any order or on any thread.

use crate::models::{BillingBasis, EnrichedTripRecord, Ownership, TripRecord, TripStatus};
use crate::rules::AttributionRules;

/// Owner of an adhoc trip. Missing or empty reasons fall to the operator.
pub fn adhoc_owner(trip: &TripRecord, rules: &AttributionRules) -> Ownership {
    match (trip.billing_basis, trip.adhoc_reason.as_deref()) {
        (BillingBasis::Planned, _) => Ownership::NotApplicable,
        (BillingBasis::Adhoc, Some(reason)) if rules.mentions_vendor(reason) => {
            Ownership::VendorIssue
        }
        (BillingBasis::Adhoc, _) => Ownership::OperatorIssue,
    }
}

/// Owner of a cancellation. Unknown or missing codes fall to the operator.
pub fn cancel_owner(trip: &TripRecord, rules: &AttributionRules) -> Ownership {
    match (&trip.status, trip.cancellation_code.as_deref()) {
        (TripStatus::Cancelled, Some(code)) if rules.is_vendor_cancel_code(code) => {
            Ownership::VendorIssue
        }
        (TripStatus::Cancelled, _) => Ownership::OperatorIssue,
        _ => Ownership::NotApplicable,
    }
}

pub fn vehicle_match(trip: &TripRecord) -> bool {
    trip.planned_vehicle_type == trip.actual_vehicle_type
}

pub fn attribute(trip: &TripRecord, rules: &AttributionRules) -> EnrichedTripRecord {
    EnrichedTripRecord {
        adhoc_owner: adhoc_owner(trip, rules),
        cancel_owner: cancel_owner(trip, rules),
        vehicle_match: vehicle_match(trip),
        trip: trip.clone(),
    }
}

pub fn attribute_batch(trips: &[TripRecord], rules: &AttributionRules) -> Vec<EnrichedTripRecord> {
    trips.iter().map(|t| attribute(t, rules)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn trip(basis: BillingBasis, status: TripStatus) -> TripRecord {
        TripRecord {
            trip_code: "MT-100".into(),
            trip_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            source_hub: "Bhiwandi MH".into(),
            billing_basis: basis,
            status,
            adhoc_reason: None,
            cancellation_code: None,
            planned_vehicle_type: "32FT".into(),
            actual_vehicle_type: "32FT".into(),
            vendor: "Acme Roadways".into(),
        }
    }

    fn adhoc_with_reason(reason: &str) -> TripRecord {
        let mut t = trip(BillingBasis::Adhoc, TripStatus::Completed);
        t.adhoc_reason = Some(reason.into());
        t
    }

    fn cancelled_with_code(code: Option<&str>) -> TripRecord {
        let mut t = trip(BillingBasis::Planned, TripStatus::Cancelled);
        t.cancellation_code = code.map(str::to_string);
        t
    }

    #[test]
    fn test_adhoc_vendor_reason() {
        let rules = AttributionRules::default();
        let t = adhoc_with_reason("VENDOR_DELAY");
        assert_eq!(adhoc_owner(&t, &rules), Ownership::VendorIssue);
    }

    #[test]
    fn test_adhoc_non_vendor_reason() {
        let rules = AttributionRules::default();
        let t = adhoc_with_reason("CUSTOMER_REQUEST");
        assert_eq!(adhoc_owner(&t, &rules), Ownership::OperatorIssue);
    }

    #[test]
    fn test_adhoc_reason_lowercase_matches() {
        let rules = AttributionRules::default();
        let t = adhoc_with_reason("extra load, vendor shortfall");
        assert_eq!(adhoc_owner(&t, &rules), Ownership::VendorIssue);
    }

    // Assumption kept for compatibility: no reason is treated as operator fault.
    #[test]
    fn test_adhoc_missing_reason_defaults_to_operator() {
        let rules = AttributionRules::default();
        let t = trip(BillingBasis::Adhoc, TripStatus::Completed);
        assert_eq!(adhoc_owner(&t, &rules), Ownership::OperatorIssue);
    }

    #[test]
    fn test_planned_trip_has_no_adhoc_owner() {
        let rules = AttributionRules::default();
        let mut t = trip(BillingBasis::Planned, TripStatus::Completed);
        t.adhoc_reason = Some("VENDOR_DELAY".into());
        assert_eq!(adhoc_owner(&t, &rules), Ownership::NotApplicable);
    }

    #[test]
    fn test_cancel_vendor_code() {
        let rules = AttributionRules::default();
        let t = cancelled_with_code(Some("VEHICLE_UNAVAILABILITY"));
        assert_eq!(cancel_owner(&t, &rules), Ownership::VendorIssue);
    }

    // Assumption kept for compatibility: an empty code is treated as operator fault.
    #[test]
    fn test_cancel_empty_code_defaults_to_operator() {
        let rules = AttributionRules::default();
        let t = cancelled_with_code(Some(""));
        assert_eq!(cancel_owner(&t, &rules), Ownership::OperatorIssue);
        let t = cancelled_with_code(None);
        assert_eq!(cancel_owner(&t, &rules), Ownership::OperatorIssue);
    }

    #[test]
    fn test_cancel_unknown_code_defaults_to_operator() {
        let rules = AttributionRules::default();
        let t = cancelled_with_code(Some("HUB_CAPACITY_FULL"));
        assert_eq!(cancel_owner(&t, &rules), Ownership::OperatorIssue);
    }

    #[test]
    fn test_non_cancelled_has_no_cancel_owner() {
        let rules = AttributionRules::default();
        let mut t = trip(BillingBasis::Planned, TripStatus::Other("IN_TRANSIT".into()));
        t.cancellation_code = Some("VEHICLE_UNAVAILABILITY".into());
        assert_eq!(cancel_owner(&t, &rules), Ownership::NotApplicable);
    }

    #[test]
    fn test_injected_codes_replace_defaults() {
        let rules = AttributionRules::new(["DRIVER_NO_SHOW"], "VENDOR");
        let t = cancelled_with_code(Some("DRIVER_NO_SHOW"));
        assert_eq!(cancel_owner(&t, &rules), Ownership::VendorIssue);
        let t = cancelled_with_code(Some("VEHICLE_UNAVAILABILITY"));
        assert_eq!(cancel_owner(&t, &rules), Ownership::OperatorIssue);
    }

    #[test]
    fn test_vehicle_match() {
        let mut t = trip(BillingBasis::Planned, TripStatus::Completed);
        assert!(vehicle_match(&t));
        t.actual_vehicle_type = "24FT".into();
        assert!(!vehicle_match(&t));
    }

    #[test]
    fn test_ownership_invariants_hold_for_all_combinations() {
        let rules = AttributionRules::default();
        let statuses = [
            TripStatus::Completed,
            TripStatus::Cancelled,
            TripStatus::Other("CREATED".into()),
        ];
        for basis in [BillingBasis::Planned, BillingBasis::Adhoc] {
            for status in &statuses {
                for reason in [None, Some("VENDOR_DELAY"), Some("")] {
                    let mut t = trip(basis, status.clone());
                    t.adhoc_reason = reason.map(str::to_string);
                    t.cancellation_code = reason.map(str::to_string);
                    let e = attribute(&t, &rules);
                    assert_eq!(e.adhoc_owner != Ownership::NotApplicable, t.is_adhoc());
                    assert_eq!(e.cancel_owner != Ownership::NotApplicable, t.is_cancelled());
                }
            }
        }
    }

    #[test]
    fn test_attribute_is_idempotent() {
        let rules = AttributionRules::default();
        let t = adhoc_with_reason("VENDOR_DELAY");
        assert_eq!(attribute(&t, &rules), attribute(&t, &rules));
    }
}
