//! Attribution rule tables
//!
//! The vendor-fault cancellation codes and the token looked up in adhoc
//! creation reasons are data, passed into the engine rather than baked in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cancellation codes that put the fault on the carrier vendor
pub const DEFAULT_VENDOR_CANCEL_CODES: [&str; 4] = [
    "PLANNED_VEHICLE_NOT_PROVIDED_BY_VENDOR",
    "VEHICLE_UNAVAILABILITY",
    "PLANNED_VEHICLE_BREAKDOWN",
    "TRANSPORT_VENDOR_ISSUE",
];

pub const DEFAULT_VENDOR_TOKEN: &str = "VENDOR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionRules {
    pub vendor_cancel_codes: BTreeSet<String>,
    /// Matched case-insensitively against the adhoc creation reason
    pub vendor_token: String,
}

impl Default for AttributionRules {
    fn default() -> Self {
        Self {
            vendor_cancel_codes: DEFAULT_VENDOR_CANCEL_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            vendor_token: DEFAULT_VENDOR_TOKEN.to_string(),
        }
    }
}

impl AttributionRules {
    pub fn new<I, S>(vendor_cancel_codes: I, vendor_token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vendor_cancel_codes: vendor_cancel_codes.into_iter().map(Into::into).collect(),
            vendor_token: vendor_token.into(),
        }
    }

    pub fn is_vendor_cancel_code(&self, code: &str) -> bool {
        self.vendor_cancel_codes.contains(code.trim())
    }

    pub fn mentions_vendor(&self, reason: &str) -> bool {
        let token = self.vendor_token.trim();
        !token.is_empty()
            && reason
                .to_ascii_uppercase()
                .contains(&token.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codes() {
        let rules = AttributionRules::default();
        assert_eq!(rules.vendor_cancel_codes.len(), 4);
        assert!(rules.is_vendor_cancel_code("TRANSPORT_VENDOR_ISSUE"));
        assert!(rules.is_vendor_cancel_code(" VEHICLE_UNAVAILABILITY "));
        assert!(!rules.is_vendor_cancel_code("DEMAND_DROP"));
    }

    #[test]
    fn test_vendor_token_case_insensitive() {
        let rules = AttributionRules::default();
        assert!(rules.mentions_vendor("vendor_delay"));
        assert!(rules.mentions_vendor("LATE_VENDOR_PLACEMENT"));
        assert!(!rules.mentions_vendor("CUSTOMER_REQUEST"));
    }

    #[test]
    fn test_blank_token_never_matches() {
        let rules = AttributionRules::new(Vec::<String>::new(), "  ");
        assert!(!rules.mentions_vendor("VENDOR"));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let rules: AttributionRules = toml::from_str(r#"vendor_token = "CARRIER""#).unwrap();
        assert_eq!(rules.vendor_token, "CARRIER");
        assert_eq!(rules.vendor_cancel_codes.len(), 4);
    }
}
