use quotecmp_core::error::QuoteError;
use std::path::PathBuf;

use crate::commands::{extractor_for, load_vocabularies};
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    vocabulary_files: &[PathBuf],
) -> Result<(), QuoteError> {
    let vocabulary = load_vocabularies(vocabulary_files)?;
    let extractor = extractor_for(&input_file)?;
    let parsed = quotecmp_core::parse_quote_detailed(&input_file, extractor.as_ref(), &vocabulary)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed quote from {}, written to {}",
                parsed.quote.carrier_name,
                path.display()
            );
            for w in &parsed.trace.warnings {
                eprintln!("  warning: {}", w.message);
            }
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => output::table::print_quote(&parsed),
        },
    }

    Ok(())
}
