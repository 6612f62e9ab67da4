//! Percentage values that keep the exact ratio but render with one decimal

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percent(f64);

impl Percent {
    /// `100 * numerator / denominator`, or 0 when the denominator is 0
    pub fn of(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Percent(0.0)
        } else {
            Percent(numerator as f64 * 100.0 / denominator as f64)
        }
    }

    /// Exact percentage (0..=100), unrounded
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
