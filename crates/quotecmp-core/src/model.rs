use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier name used when no issuer could be identified.
pub const UNKNOWN_CARRIER: &str = "Unknown";

/// Limit shown for a coverage line one quote does not carry.
pub const NOT_OFFERED: &str = "Not Offered";

/// One named coverage with its limit as stated in the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageLine {
    /// Canonical name from the controlled vocabulary (e.g. "General Liability").
    pub name: String,
    /// Human-readable limit: "$1,000,000 per occurrence", "Included", "N/A".
    pub limit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<String>,
    /// Premium charged for this line, when the schedule itemizes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<Decimal>,
}

/// Normalized record for a single quote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub carrier_name: String,
    /// Always two decimal places, serialized as a string.
    pub annual_premium: Decimal,
    pub summary: String,
    #[serde(default)]
    pub coverages: Vec<CoverageLine>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_period: Option<String>,
}

impl Quote {
    pub fn coverage(&self, name: &str) -> Option<&CoverageLine> {
        self.coverages.iter().find(|c| c.name == name)
    }
}

impl Default for Quote {
    fn default() -> Self {
        Quote {
            carrier_name: UNKNOWN_CARRIER.to_string(),
            annual_premium: Decimal::new(0, 2),
            summary: String::new(),
            coverages: Vec::new(),
            exclusions: Vec::new(),
            policy_period: None,
        }
    }
}

/// Which of the two compared quotes a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSide {
    Quote1,
    Quote2,
}

impl QuoteSide {
    pub fn other(self) -> QuoteSide {
        match self {
            QuoteSide::Quote1 => QuoteSide::Quote2,
            QuoteSide::Quote2 => QuoteSide::Quote1,
        }
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSide::Quote1 => write!(f, "Option A"),
            QuoteSide::Quote2 => write!(f, "Option B"),
        }
    }
}
