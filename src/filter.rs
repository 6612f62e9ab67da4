//! Date and hub selection applied by callers before summarising

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::TripRecord;

/// `None` leaves a dimension unrestricted; an empty hub set selects nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub date: Option<NaiveDate>,
    pub hubs: Option<BTreeSet<String>>,
}

impl TripFilter {
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            hubs: None,
        }
    }

    pub fn with_hubs<I, S>(mut self, hubs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hubs = Some(hubs.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.date.map_or(true, |d| trip.trip_date == d)
            && self
                .hubs
                .as_ref()
                .map_or(true, |hubs| hubs.contains(&trip.source_hub))
    }

    pub fn apply(&self, trips: &[TripRecord]) -> Vec<TripRecord> {
        trips.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Distinct trip dates, newest first
pub fn available_dates(trips: &[TripRecord]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = trips.iter().map(|t| t.trip_date).collect();
    dates.into_iter().rev().collect()
}

/// Distinct source hubs in name order
pub fn available_hubs(trips: &[TripRecord]) -> Vec<String> {
    let hubs: BTreeSet<&str> = trips.iter().map(|t| t.source_hub.as_str()).collect();
    hubs.into_iter().map(str::to_string).collect()
}
