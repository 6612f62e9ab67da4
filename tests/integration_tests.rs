use chrono::NaiveDate;
use linehaul_ops::engine::{summarize, EngineConfig};
use linehaul_ops::filter::{available_dates, available_hubs, TripFilter};
use linehaul_ops::loader::{read_trips, read_trips_from_path};
use linehaul_ops::models::Ownership;
use linehaul_ops::LinehaulError;
use std::path::Path;

fn fixture() -> Vec<linehaul_ops::models::TripRecord> {
    read_trips_from_path(Path::new("tests/fixtures/trips.csv")).expect("Failed to read fixture")
}

fn march_5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[test]
fn test_full_pipeline() {
    let trips = fixture();
    assert_eq!(trips.len(), 10);

    let dates = available_dates(&trips);
    assert_eq!(dates[0], march_5());
    assert_eq!(available_hubs(&trips), vec!["Bhiwandi MH", "Hoskote MH", "Medchal MH"]);

    let selected = TripFilter::on_date(march_5()).apply(&trips);
    let report = summarize(&selected, &EngineConfig::default());

    let k = &report.kpis;
    assert_eq!(k.total_trips, 8);
    assert_eq!((k.planned, k.executed_on_plan), (4, 2));
    assert_eq!(k.plan_execution_rate.to_string(), "50.0%");
    assert_eq!(k.adhoc_rate.to_string(), "50.0%");
    assert_eq!(k.cancel_rate.to_string(), "37.5%");
    assert_eq!(k.vehicle_compliance_rate.to_string(), "75.0%");

    let hubs: Vec<_> = report.hubs.iter().map(|h| (h.hub.as_str(), h.total)).collect();
    assert_eq!(hubs, [("Bhiwandi MH", 4), ("Hoskote MH", 2), ("Medchal MH", 2)]);

    let bhiwandi = &report.hubs[0];
    assert_eq!(bhiwandi.plan_success_rate.to_string(), "50.0%");
    assert_eq!((bhiwandi.adhoc_vendor, bhiwandi.adhoc_operator), (1, 1));
    assert_eq!((bhiwandi.cancel_vendor, bhiwandi.cancel_operator), (1, 1));
    assert_eq!(bhiwandi.vehicle_compliance.to_string(), "75.0%");

    let medchal = &report.hubs[2];
    assert_eq!(medchal.plan_success_rate.to_string(), "0.0%");
    assert_eq!(medchal.adhoc_operator, 2);
    assert_eq!(medchal.cancel_operator, 1);

    let top: Vec<_> = report
        .top_vendors
        .iter()
        .map(|v| (v.vendor.as_str(), v.total_failures))
        .collect();
    assert_eq!(
        top,
        [
            ("Bharat Carriers", 3),
            ("Deccan Logistics", 3),
            ("Acme Roadways", 1),
            ("Coastal Freight", 0)
        ]
    );

    let sum: u64 = report.hubs.iter().map(|h| h.total).sum();
    assert_eq!(sum as usize, selected.len());
}

#[test]
fn test_enriched_trips_carry_ownership() {
    let report = summarize(&fixture(), &EngineConfig::default());
    let by_code = |code: &str| {
        report
            .trips
            .iter()
            .find(|t| t.trip.trip_code == code)
            .unwrap()
            .clone()
    };

    let t = by_code("MT-0006");
    assert_eq!(t.adhoc_owner, Ownership::VendorIssue);
    assert_eq!(t.cancel_owner, Ownership::OperatorIssue);

    // No reason and no code are both attributed to the operator
    let t = by_code("MT-0010");
    assert_eq!(t.adhoc_owner, Ownership::OperatorIssue);
    assert_eq!(t.cancel_owner, Ownership::OperatorIssue);

    let t = by_code("MT-0008");
    assert_eq!(t.adhoc_owner, Ownership::NotApplicable);
    assert_eq!(t.cancel_owner, Ownership::NotApplicable);
    assert!(!t.vehicle_match);
}

#[test]
fn test_hub_filter_before_engine() {
    let trips = fixture();
    let selected = TripFilter::on_date(march_5())
        .with_hubs(["Hoskote MH", "Medchal MH"])
        .apply(&trips);
    let report = summarize(&selected, &EngineConfig::default());
    assert_eq!(report.kpis.total_trips, 4);
    assert!(report.hubs.iter().all(|h| h.hub != "Bhiwandi MH"));
}

#[test]
fn test_blank_vendor_rejects_batch() {
    let csv = std::fs::read_to_string("tests/fixtures/trips.csv").unwrap();
    let broken = csv.replace("MT-0007,2024-03-05,Hoskote MH,Planned,COMPLETED,,,19FT,19FT,Coastal Freight",
                             "MT-0007,2024-03-05,Hoskote MH,Planned,COMPLETED,,,19FT,19FT,");
    let err = read_trips(broken.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        LinehaulError::MissingField { row: 7, field: "actual_vendor" }
    ));
}
