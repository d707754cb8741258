use crate::error::QuoteError;
use crate::extraction::{PageContent, PdfExtractor};

/// Backend for documents that are already text (e.g. saved pdftotext output).
///
/// Pages are separated by form feed, like pdftotext's own output.
pub struct PlainTextExtractor;

impl PdfExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, QuoteError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| QuoteError::UnreadablePdf(format!("text input is not UTF-8: {}", e)))?;

        let pages = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                lines: page_text.lines().map(|l| l.to_string()).collect(),
                line_spans: vec![],
            })
            .filter(|p| !p.lines.is_empty() || p.page_number == 1)
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "text"
    }
}
