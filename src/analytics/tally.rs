//! Mergeable trip counters and per-key grouping

use std::collections::BTreeMap;

use crate::models::{EnrichedTripRecord, Ownership};

/// Counters behind every summary rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: u64,
    pub planned: u64,
    pub completed_planned: u64,
    pub adhoc: u64,
    pub cancelled: u64,
    pub adhoc_vendor: u64,
    pub adhoc_operator: u64,
    pub cancel_vendor: u64,
    pub cancel_operator: u64,
    pub vehicle_matches: u64,
}

impl Tally {
    pub fn record(&mut self, r: &EnrichedTripRecord) {
        self.total += 1;
        if r.trip.is_planned() {
            self.planned += 1;
        }
        if r.trip.is_completed_on_plan() {
            self.completed_planned += 1;
        }
        if r.trip.is_adhoc() {
            self.adhoc += 1;
        }
        if r.trip.is_cancelled() {
            self.cancelled += 1;
        }
        match r.adhoc_owner {
            Ownership::VendorIssue => self.adhoc_vendor += 1,
            Ownership::OperatorIssue => self.adhoc_operator += 1,
            Ownership::NotApplicable => {}
        }
        match r.cancel_owner {
            Ownership::VendorIssue => self.cancel_vendor += 1,
            Ownership::OperatorIssue => self.cancel_operator += 1,
            Ownership::NotApplicable => {}
        }
        if r.vehicle_match {
            self.vehicle_matches += 1;
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.total += other.total;
        self.planned += other.planned;
        self.completed_planned += other.completed_planned;
        self.adhoc += other.adhoc;
        self.cancelled += other.cancelled;
        self.adhoc_vendor += other.adhoc_vendor;
        self.adhoc_operator += other.adhoc_operator;
        self.cancel_vendor += other.cancel_vendor;
        self.cancel_operator += other.cancel_operator;
        self.vehicle_matches += other.vehicle_matches;
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedTripRecord>,
    {
        let mut tally = Tally::default();
        for r in records {
            tally.record(r);
        }
        tally
    }
}

/// Partition records by `key` and tally each group
pub fn group_by<'a, I, F>(records: I, key: F) -> BTreeMap<String, Tally>
where
    I: IntoIterator<Item = &'a EnrichedTripRecord>,
    F: Fn(&EnrichedTripRecord) -> &str,
{
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();
    for r in records {
        let k = key(r);
        match groups.get_mut(k) {
            Some(t) => t.record(r),
            None => {
                let mut t = Tally::default();
                t.record(r);
                groups.insert(k.to_string(), t);
            }
        }
    }
    groups
}

/// Merge per-key tallies computed on separate shards
pub fn merge_groups(into: &mut BTreeMap<String, Tally>, other: &BTreeMap<String, Tally>) {
    for (k, t) in other {
        into.entry(k.clone()).or_default().merge(t);
    }
}
