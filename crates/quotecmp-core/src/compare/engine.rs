use crate::compare::outcome::{ComparisonResult, CoverageAlignment, PremiumComparison, Presence};
use crate::model::{Quote, QuoteSide, NOT_OFFERED};
use rust_decimal::RoundingStrategy;

/// Align two normalized quotes.
///
/// Rows follow the first quote's coverage order, then coverages only the
/// second quote carries in its order. Names match exactly; a coverage
/// missing on one side is reported as "Not Offered", never as an error.
pub fn compare(quote1: Quote, quote2: Quote) -> ComparisonResult {
    let mut coverage_alignment = Vec::new();

    for line in &quote1.coverages {
        let (limit_in_quote2, presence) = match quote2.coverage(&line.name) {
            Some(other) => (other.limit.clone(), Presence::Both),
            None => (NOT_OFFERED.to_string(), Presence::Quote1Only),
        };
        coverage_alignment.push(CoverageAlignment {
            name: line.name.clone(),
            limit_in_quote1: line.limit.clone(),
            limit_in_quote2,
            presence,
        });
    }

    for line in &quote2.coverages {
        if quote1.coverage(&line.name).is_none() {
            coverage_alignment.push(CoverageAlignment {
                name: line.name.clone(),
                limit_in_quote1: NOT_OFFERED.to_string(),
                limit_in_quote2: line.limit.clone(),
                presence: Presence::Quote2Only,
            });
        }
    }

    let premium = compare_premiums(&quote1, &quote2);
    tracing::debug!(
        rows = coverage_alignment.len(),
        difference = %premium.difference,
        "quotes aligned"
    );

    ComparisonResult {
        quote1,
        quote2,
        coverage_alignment,
        premium,
    }
}

fn compare_premiums(quote1: &Quote, quote2: &Quote) -> PremiumComparison {
    let mut difference = (quote1.annual_premium - quote2.annual_premium)
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    difference.rescale(2);

    let lower = match quote1.annual_premium.cmp(&quote2.annual_premium) {
        std::cmp::Ordering::Less => Some(QuoteSide::Quote1),
        std::cmp::Ordering::Greater => Some(QuoteSide::Quote2),
        std::cmp::Ordering::Equal => None,
    };

    PremiumComparison { difference, lower }
}
