pub mod carrier;
pub mod coverage;
pub mod exclusions;
pub mod labels;
pub mod premium;
pub mod summary;

use crate::error::QuoteError;
use crate::extraction::{ensure_text_layer, PageContent};
use crate::normalize::normalize;
use crate::trace::{ParseTrace, ParsedQuote, QuoteField};
use crate::vocabulary::Vocabulary;

/// A line of the document with its position.
#[derive(Debug, Clone, Copy)]
pub struct DocLine<'a> {
    pub page_number: usize,
    pub line_index: usize,
    pub text: &'a str,
}

/// Flatten pages into document order.
pub fn document_lines(pages: &[PageContent]) -> Vec<DocLine<'_>> {
    pages
        .iter()
        .flat_map(|p| {
            p.lines.iter().enumerate().map(|(i, l)| DocLine {
                page_number: p.page_number,
                line_index: i,
                text: l.as_str(),
            })
        })
        .collect()
}

/// A scalar field value and the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub value: String,
    pub page_number: usize,
    pub line_index: usize,
    pub text: String,
}

impl FieldMatch {
    fn at(line: &DocLine<'_>, value: impl Into<String>) -> Self {
        FieldMatch {
            value: value.into(),
            page_number: line.page_number,
            line_index: line.line_index,
            text: line.text.to_string(),
        }
    }
}

/// A coverage line as found in the text, before canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCoverage {
    pub label: String,
    pub limit: String,
    pub deductible: Option<String>,
    /// Per-line premium from a schedule's premium column.
    pub premium: Option<String>,
    pub page_number: usize,
    pub line_index: usize,
}

/// Field values as extracted by the rules, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawQuote {
    pub carrier_name: Option<String>,
    pub premium: Option<String>,
    pub coverages: Vec<RawCoverage>,
    pub exclusions: Vec<String>,
    pub policy_period: Option<String>,
}

/// Run every field rule over the extracted pages and normalize the result.
///
/// Rules never fail: a field that cannot be found falls back to its default
/// and leaves a warning in the trace. The only error is a document without
/// any text.
pub fn parse_pages(pages: &[PageContent], vocabulary: &Vocabulary) -> Result<ParsedQuote, QuoteError> {
    ensure_text_layer(pages)?;

    let lines = document_lines(pages);
    let mut trace = ParseTrace::default();

    let carrier = carrier::find_carrier(&lines, vocabulary);
    let premium = premium::find_premium(&lines, vocabulary);
    let policy_period = labels::find_policy_period(&lines, vocabulary);
    let exclusions = exclusions::extract_exclusions(pages, vocabulary);
    let coverages = coverage::extract_coverages(pages, vocabulary, &exclusions.lines);

    for (field, found) in [
        (QuoteField::CarrierName, &carrier),
        (QuoteField::AnnualPremium, &premium),
        (QuoteField::PolicyPeriod, &policy_period),
    ] {
        if let Some(found) = found {
            trace.cite(field, found, pages);
        }
    }

    tracing::debug!(
        carrier = carrier.as_ref().map(|m| m.value.as_str()),
        premium = premium.as_ref().map(|m| m.value.as_str()),
        coverages = coverages.len(),
        exclusions = exclusions.items.len(),
        "field rules finished"
    );

    let raw = RawQuote {
        carrier_name: carrier.map(|m| m.value),
        premium: premium.map(|m| m.value),
        coverages,
        exclusions: exclusions.items,
        policy_period: policy_period.map(|m| m.value),
    };
    let quote = normalize(raw, vocabulary, &mut trace);

    Ok(ParsedQuote { quote, trace })
}
