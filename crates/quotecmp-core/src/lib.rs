pub mod compare;
pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod parsing;
pub mod trace;
pub mod vocabulary;

use compare::outcome::ComparisonResult;
use error::QuoteError;
use extraction::PdfExtractor;
use model::Quote;
use std::path::Path;
use trace::ParsedQuote;
use vocabulary::Vocabulary;

/// Parse one quote document held in memory.
///
/// Fails only when the bytes cannot be read as a document with a text
/// layer; fields that cannot be found are defaulted and reported in the
/// returned trace.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    vocabulary: &Vocabulary,
) -> Result<ParsedQuote, QuoteError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "text extracted"
    );
    parsing::parse_pages(&pages, vocabulary)
}

/// Parse a quote file, keeping the parse trace.
pub fn parse_quote_detailed(
    path: &Path,
    extractor: &dyn PdfExtractor,
    vocabulary: &Vocabulary,
) -> Result<ParsedQuote, QuoteError> {
    let bytes = std::fs::read(path)?;
    let parsed = parse_pdf(&bytes, extractor, vocabulary)?;
    tracing::info!(
        file = %path.display(),
        carrier = %parsed.quote.carrier_name,
        premium = %parsed.quote.annual_premium,
        warnings = parsed.trace.warnings.len(),
        "parsed quote"
    );
    Ok(parsed)
}

/// Parse a quote file into its normalized record.
pub fn parse_quote(
    path: &Path,
    extractor: &dyn PdfExtractor,
    vocabulary: &Vocabulary,
) -> Result<Quote, QuoteError> {
    parse_quote_detailed(path, extractor, vocabulary).map(|parsed| parsed.quote)
}

/// Align two parsed quotes. Never fails.
pub fn compare_quotes(quote1: Quote, quote2: Quote) -> ComparisonResult {
    compare::compare(quote1, quote2)
}

/// Compare two quotes and serialize the result as pretty-printed JSON.
pub fn compare_quotes_as_json(quote1: Quote, quote2: Quote) -> Result<String, QuoteError> {
    let result = compare_quotes(quote1, quote2);
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Parse both files and compare them.
pub fn compare_files(
    path1: &Path,
    path2: &Path,
    extractor: &dyn PdfExtractor,
    vocabulary: &Vocabulary,
) -> Result<ComparisonResult, QuoteError> {
    let quote1 = parse_quote(path1, extractor, vocabulary)?;
    let quote2 = parse_quote(path2, extractor, vocabulary)?;
    Ok(compare_quotes(quote1, quote2))
}
