//! Fleet-wide scorecard

use serde::Serialize;

use super::tally::Tally;
use crate::models::EnrichedTripRecord;
use crate::percent::Percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OwnershipBreakdown {
    pub vendor: u64,
    pub operator: u64,
}

impl OwnershipBreakdown {
    pub fn total(&self) -> u64 {
        self.vendor + self.operator
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetKpis {
    pub total_trips: u64,
    pub planned: u64,
    pub executed_on_plan: u64,
    pub plan_failed: u64,
    pub adhocs: u64,
    pub cancellations: u64,
    pub vehicle_matches: u64,
    pub plan_execution_rate: Percent,
    pub adhoc_rate: Percent,
    pub cancel_rate: Percent,
    pub vehicle_compliance_rate: Percent,
    pub adhoc_ownership: OwnershipBreakdown,
    pub cancel_ownership: OwnershipBreakdown,
}

impl From<&Tally> for FleetKpis {
    fn from(t: &Tally) -> Self {
        Self {
            total_trips: t.total,
            planned: t.planned,
            executed_on_plan: t.completed_planned,
            plan_failed: t.planned - t.completed_planned,
            adhocs: t.adhoc,
            cancellations: t.cancelled,
            vehicle_matches: t.vehicle_matches,
            plan_execution_rate: Percent::of(t.completed_planned, t.planned),
            adhoc_rate: Percent::of(t.adhoc, t.total),
            cancel_rate: Percent::of(t.cancelled, t.total),
            vehicle_compliance_rate: Percent::of(t.vehicle_matches, t.total),
            adhoc_ownership: OwnershipBreakdown {
                vendor: t.adhoc_vendor,
                operator: t.adhoc_operator,
            },
            cancel_ownership: OwnershipBreakdown {
                vendor: t.cancel_vendor,
                operator: t.cancel_operator,
            },
        }
    }
}

pub fn summarize_fleet(records: &[EnrichedTripRecord]) -> FleetKpis {
    FleetKpis::from(&Tally::from_records(records))
}
