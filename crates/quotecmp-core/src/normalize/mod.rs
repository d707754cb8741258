pub mod amount;
pub mod labels;

use crate::model::{CoverageLine, Quote, UNKNOWN_CARRIER};
use crate::parsing::summary::summarize;
use crate::parsing::RawQuote;
use crate::trace::{ParseTrace, QuoteField, WarningKind};
use crate::vocabulary::Vocabulary;
use amount::parse_amount;
use labels::{canonical_coverage_name, collapse_ws, normalize_limit};
use rust_decimal::Decimal;

/// Turn raw rule output into a `Quote`.
///
/// Missing or unparseable fields fall back to their defaults and leave a
/// warning in `trace`; this never fails.
pub fn normalize(raw: RawQuote, vocabulary: &Vocabulary, trace: &mut ParseTrace) -> Quote {
    let carrier_name = match raw.carrier_name.map(|c| collapse_ws(&c)) {
        Some(name) if !name.is_empty() => name,
        _ => {
            trace.warn(
                QuoteField::CarrierName,
                WarningKind::MissingField,
                "no carrier found; using \"Unknown\"",
            );
            UNKNOWN_CARRIER.to_string()
        }
    };

    let annual_premium = match raw.premium {
        Some(text) => match parse_amount(&text) {
            Ok(amount) => amount,
            Err(e) => {
                trace.warn(
                    QuoteField::AnnualPremium,
                    WarningKind::InvalidAmount,
                    format!("{}; using 0.00", e),
                );
                Decimal::new(0, 2)
            }
        },
        None => {
            trace.warn(
                QuoteField::AnnualPremium,
                WarningKind::MissingField,
                "no premium found; using 0.00",
            );
            Decimal::new(0, 2)
        }
    };

    let mut coverages: Vec<CoverageLine> = Vec::new();
    for raw_line in raw.coverages {
        let name = canonical_coverage_name(&raw_line.label, vocabulary);
        let limit = normalize_limit(&raw_line.limit);
        let deductible = raw_line
            .deductible
            .map(|d| normalize_limit(&d))
            .filter(|d| !d.is_empty());
        let premium = raw_line.premium.and_then(|text| match parse_amount(&text) {
            Ok(amount) => Some(amount),
            Err(e) => {
                trace.warn(
                    QuoteField::Coverages,
                    WarningKind::InvalidAmount,
                    format!("{} premium: {}", name, e),
                );
                None
            }
        });

        match coverages.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                if existing.limit.is_empty() {
                    existing.limit = limit;
                }
                if existing.deductible.is_none() {
                    existing.deductible = deductible;
                }
                if existing.premium.is_none() {
                    existing.premium = premium;
                }
            }
            None => coverages.push(CoverageLine {
                name,
                limit,
                deductible,
                premium,
            }),
        }
    }
    if coverages.is_empty() {
        trace.warn(
            QuoteField::Coverages,
            WarningKind::MissingField,
            "no coverage lines found",
        );
    }

    let mut exclusions: Vec<String> = Vec::new();
    for item in raw.exclusions {
        let item = collapse_ws(&item);
        if !item.is_empty() && !exclusions.contains(&item) {
            exclusions.push(item);
        }
    }
    if exclusions.is_empty() {
        trace.warn(
            QuoteField::Exclusions,
            WarningKind::MissingField,
            "no exclusions listed",
        );
    }

    let policy_period = raw
        .policy_period
        .map(|p| collapse_ws(&p))
        .filter(|p| !p.is_empty());

    let mut quote = Quote {
        carrier_name,
        annual_premium,
        summary: String::new(),
        coverages,
        exclusions,
        policy_period,
    };
    quote.summary = summarize(&quote);
    quote
}
