use crate::extraction::{BBox, PageContent};
use crate::model::Quote;
use crate::parsing::FieldMatch;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteField {
    CarrierName,
    AnnualPremium,
    Coverages,
    Exclusions,
    PolicyPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Field absent from the document; the default value was used.
    MissingField,
    /// An amount was found but could not be parsed; 0.00 was used.
    InvalidAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    pub field: QuoteField,
    pub kind: WarningKind,
    pub message: String,
}

/// Where in the document a scalar field was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSpan {
    pub field: QuoteField,
    pub page_number: usize,
    pub line_index: usize,
    pub matched_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseTrace {
    pub trace_schema_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceSpan>,
}

impl Default for ParseTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            warnings: Vec::new(),
            evidence: Vec::new(),
        }
    }
}

impl ParseTrace {
    pub fn warn(&mut self, field: QuoteField, kind: WarningKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            WarningKind::InvalidAmount => tracing::warn!(?field, "{}", message),
            WarningKind::MissingField => tracing::debug!(?field, "{}", message),
        }
        self.warnings.push(TraceWarning {
            field,
            kind,
            message,
        });
    }

    /// Record the line a field value came from, with its bounding box when
    /// the extraction backend provided one.
    pub fn cite(&mut self, field: QuoteField, found: &FieldMatch, pages: &[PageContent]) {
        let bbox = pages
            .iter()
            .find(|p| p.page_number == found.page_number)
            .and_then(|p| p.span_for_line(found.line_index))
            .map(|span| span.bbox.clone());

        self.evidence.push(EvidenceSpan {
            field,
            page_number: found.page_number,
            line_index: found.line_index,
            matched_text: found.text.trim().to_string(),
            bbox,
        });
    }

    pub fn has_warning(&self, field: QuoteField, kind: WarningKind) -> bool {
        self.warnings
            .iter()
            .any(|w| w.field == field && w.kind == kind)
    }
}

/// A parsed quote together with the diagnostics gathered while parsing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedQuote {
    pub quote: Quote,
    pub trace: ParseTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::LineSpan;

    #[test]
    fn test_cite_attaches_bbox_when_available() {
        let mut page = PageContent::from_lines(1, &["Travelers Casualty and Surety"]);
        page.line_spans.push(LineSpan {
            page_number: 1,
            line_index: 0,
            text: "Travelers Casualty and Surety".into(),
            bbox: BBox {
                x_min: 36.0,
                y_min: 40.0,
                x_max: 240.0,
                y_max: 52.0,
            },
        });
        let found = FieldMatch {
            value: "Travelers".into(),
            page_number: 1,
            line_index: 0,
            text: "  Travelers Casualty and Surety".into(),
        };

        let mut trace = ParseTrace::default();
        trace.cite(QuoteField::CarrierName, &found, &[page]);
        assert_eq!(trace.evidence.len(), 1);
        assert_eq!(trace.evidence[0].matched_text, "Travelers Casualty and Surety");
        assert_eq!(trace.evidence[0].bbox.as_ref().map(|b| b.x_min), Some(36.0));
    }

    #[test]
    fn test_warnings_serialize_snake_case() {
        let mut trace = ParseTrace::default();
        trace.warn(
            QuoteField::AnnualPremium,
            WarningKind::InvalidAmount,
            "premium 'TBD' is not a number",
        );
        assert!(trace.has_warning(QuoteField::AnnualPremium, WarningKind::InvalidAmount));
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["warnings"][0]["field"], "annual_premium");
        assert_eq!(json["warnings"][0]["kind"], "invalid_amount");
        assert!(json.get("evidence").is_none());
    }
}
