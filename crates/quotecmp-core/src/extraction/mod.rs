pub mod pdftotext;
pub mod table;
pub mod text;

use crate::error::QuoteError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

#[derive(Debug, Clone)]
pub struct LineSpan {
    pub page_number: usize,
    pub line_index: usize,
    pub text: String,
    pub bbox: BBox,
}

/// Content extracted from a single page of a PDF.
///
/// `lines` keep the layout whitespace of the backend, so the character
/// offset of a token approximates its column on the page.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
    pub line_spans: Vec<LineSpan>,
}

impl PageContent {
    pub fn from_lines<S: AsRef<str>>(page_number: usize, lines: &[S]) -> Self {
        PageContent {
            page_number,
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            line_spans: Vec::new(),
        }
    }

    pub fn span_for_line(&self, line_index: usize) -> Option<&LineSpan> {
        self.line_spans.iter().find(|s| s.line_index == line_index)
    }

    fn has_text(&self) -> bool {
        self.lines.iter().any(|l| !l.trim().is_empty())
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, QuoteError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Fail with `UnreadablePdf` unless at least one page carries text.
///
/// Image-only scans come back from pdftotext as pages of blank lines.
pub fn ensure_text_layer(pages: &[PageContent]) -> Result<(), QuoteError> {
    if pages.iter().any(PageContent::has_text) {
        Ok(())
    } else {
        Err(QuoteError::UnreadablePdf(
            "no extractable text layer (image-only or empty document)".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pages_have_no_text_layer() {
        let pages = vec![PageContent::from_lines(1, &["", "   "])];
        assert!(matches!(
            ensure_text_layer(&pages),
            Err(QuoteError::UnreadablePdf(_))
        ));
        assert!(ensure_text_layer(&[]).is_err());
    }

    #[test]
    fn test_text_on_later_page_is_enough() {
        let pages = vec![
            PageContent::from_lines(1, &[""]),
            PageContent::from_lines(2, &["Travelers"]),
        ];
        assert!(ensure_text_layer(&pages).is_ok());
    }
}
