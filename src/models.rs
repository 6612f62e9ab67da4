use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{LinehaulError, Result};

/// Raw record from CSV ingestion
///
/// Every column is optional at this stage so that an absent column and a
/// blank cell are both reported as a missing field by [`CsvRecord::to_trip`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CsvRecord {
    pub master_trip_code: Option<String>,
    pub trip_date: Option<String>,
    pub source_mh_name: Option<String>,
    pub actual_billing_basis: Option<String>,
    pub trip_status: Option<String>,
    pub adhoc_trip_creation_reason: Option<String>,
    pub cancellation_reason_code: Option<String>,
    pub planned_vehicle_type: Option<String>,
    pub actual_vehicle_type: Option<String>,
    pub actual_vendor: Option<String>,
}

/// Billing basis of a trip
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BillingBasis {
    Planned,
    Adhoc,
}

impl BillingBasis {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planned" => Some(BillingBasis::Planned),
            "adhoc" | "ad-hoc" | "ad hoc" => Some(BillingBasis::Adhoc),
            _ => None,
        }
    }
}

/// Trip lifecycle status
///
/// Serializes as the upstream status text in every case: `COMPLETED`,
/// `CANCELLED`, or the raw value for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripStatus {
    Completed,
    Cancelled,
    /// Any other status reported upstream (in transit, created, ...)
    Other(String),
}

impl From<&str> for TripStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMPLETED" => TripStatus::Completed,
            "CANCELLED" | "CANCELED" => TripStatus::Cancelled,
            _ => TripStatus::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripStatus::Completed => f.write_str("COMPLETED"),
            TripStatus::Cancelled => f.write_str("CANCELLED"),
            TripStatus::Other(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TripStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TripStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TripStatus::from(raw.as_str()))
    }
}

/// Fault attribution for an adhoc trip or a cancellation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Ownership {
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Vendor Issue")]
    VendorIssue,
    #[serde(rename = "Operator Issue")]
    OperatorIssue,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ownership::NotApplicable => "N/A",
            Ownership::VendorIssue => "Vendor Issue",
            Ownership::OperatorIssue => "Operator Issue",
        };
        f.write_str(label)
    }
}

/// Validated trip record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRecord {
    pub trip_code: String,
    pub trip_date: NaiveDate,
    pub source_hub: String,
    pub billing_basis: BillingBasis,
    pub status: TripStatus,
    pub adhoc_reason: Option<String>,
    pub cancellation_code: Option<String>,
    pub planned_vehicle_type: String,
    pub actual_vehicle_type: String,
    pub vendor: String,
}

/// Trip record with its derived attribution fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedTripRecord {
    #[serde(flatten)]
    pub trip: TripRecord,
    pub adhoc_owner: Ownership,
    pub cancel_owner: Ownership,
    pub vehicle_match: bool,
}

impl TripRecord {
    pub fn is_planned(&self) -> bool {
        self.billing_basis == BillingBasis::Planned
    }

    pub fn is_adhoc(&self) -> bool {
        self.billing_basis == BillingBasis::Adhoc
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TripStatus::Cancelled
    }

    pub fn is_completed_on_plan(&self) -> bool {
        self.is_planned() && self.status == TripStatus::Completed
    }
}

fn required(value: &Option<String>, row: usize, field: &'static str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LinehaulError::missing(row, field)),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a trip date, dropping any time component
pub fn parse_trip_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl CsvRecord {
    /// Validate the raw row; `row` is the 1-based data row used in errors
    pub fn to_trip(&self, row: usize) -> Result<TripRecord> {
        let trip_code = required(&self.master_trip_code, row, "master_trip_code")?;

        let raw_date = required(&self.trip_date, row, "trip_date")?;
        let trip_date = parse_trip_date(&raw_date)
            .ok_or_else(|| LinehaulError::invalid(row, "trip_date", raw_date.clone()))?;

        let source_hub = required(&self.source_mh_name, row, "source_mh_name")?;

        let raw_basis = required(&self.actual_billing_basis, row, "actual_billing_basis")?;
        let billing_basis = BillingBasis::parse(&raw_basis)
            .ok_or_else(|| LinehaulError::invalid(row, "actual_billing_basis", raw_basis.clone()))?;

        let status = TripStatus::from(required(&self.trip_status, row, "trip_status")?.as_str());

        Ok(TripRecord {
            trip_code,
            trip_date,
            source_hub,
            billing_basis,
            status,
            adhoc_reason: optional(&self.adhoc_trip_creation_reason),
            cancellation_code: optional(&self.cancellation_reason_code),
            planned_vehicle_type: required(&self.planned_vehicle_type, row, "planned_vehicle_type")?,
            actual_vehicle_type: required(&self.actual_vehicle_type, row, "actual_vehicle_type")?,
            vendor: required(&self.actual_vendor, row, "actual_vendor")?,
        })
    }
}

/// Validate a whole batch, failing on the first bad row
pub fn validate_batch(rows: &[CsvRecord]) -> Result<Vec<TripRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| r.to_trip(i + 1))
        .collect()
}
