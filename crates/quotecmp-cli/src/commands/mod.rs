pub mod compare;
pub mod parse;
pub mod vocabulary;

use quotecmp_core::error::QuoteError;
use quotecmp_core::extraction::pdftotext::PdftotextExtractor;
use quotecmp_core::extraction::text::PlainTextExtractor;
use quotecmp_core::extraction::PdfExtractor;
use quotecmp_core::vocabulary::{builtin, load_vocabulary, Vocabulary};
use std::path::{Path, PathBuf};

/// Built-in vocabulary extended with any custom files, in order.
pub fn load_vocabularies(files: &[PathBuf]) -> Result<Vocabulary, QuoteError> {
    let mut def = builtin::load_preset(builtin::DEFAULT_PRESET)?;
    for path in files {
        let extra = load_vocabulary(path)?;
        tracing::info!(file = %path.display(), name = %extra.name, "extending vocabulary");
        def.extend(extra);
    }
    Vocabulary::compile(&def)
}

/// `.txt` inputs are pre-extracted text; everything else goes through
/// pdftotext, which must be installed.
pub fn extractor_for(path: &Path) -> Result<Box<dyn PdfExtractor>, QuoteError> {
    let is_text = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if is_text {
        return Ok(Box::new(PlainTextExtractor));
    }
    if !PdftotextExtractor::is_available() {
        return Err(QuoteError::PdftotextNotFound);
    }
    Ok(Box::new(PdftotextExtractor::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_files_skip_pdftotext() {
        let extractor = extractor_for(Path::new("quotes/chubb.TXT")).unwrap();
        assert_eq!(extractor.backend_name(), "text");
    }

    #[test]
    fn test_pdf_backend_requires_pdftotext() {
        match extractor_for(Path::new("quotes/chubb.pdf")) {
            Ok(extractor) => assert_eq!(extractor.backend_name(), "pdftotext"),
            Err(e) => assert!(matches!(e, QuoteError::PdftotextNotFound)),
        }
    }
}
