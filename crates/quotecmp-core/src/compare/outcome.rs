use crate::model::{Quote, QuoteSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which quotes carry a coverage line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    Quote1Only,
    Quote2Only,
}

/// One row of the side-by-side coverage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageAlignment {
    /// Canonical coverage name.
    pub name: String,
    /// Limit in the first quote, or "Not Offered".
    pub limit_in_quote1: String,
    /// Limit in the second quote, or "Not Offered".
    pub limit_in_quote2: String,
    pub presence: Presence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumComparison {
    /// Absolute difference between the two annual premiums.
    pub difference: Decimal,
    /// The cheaper quote; `None` when both cost the same.
    pub lower: Option<QuoteSide>,
}

/// Both quotes, unchanged, plus their alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub quote1: Quote,
    pub quote2: Quote,
    pub coverage_alignment: Vec<CoverageAlignment>,
    pub premium: PremiumComparison,
}
