use quotecmp_core::error::QuoteError;
use std::path::{Path, PathBuf};

use crate::commands::{extractor_for, load_vocabularies};
use crate::output;

pub fn run(
    quote1: &Path,
    quote2: &Path,
    output_format: &str,
    vocabulary_files: &[PathBuf],
) -> Result<(), QuoteError> {
    let vocabulary = load_vocabularies(vocabulary_files)?;

    let q1 = quotecmp_core::parse_quote(quote1, extractor_for(quote1)?.as_ref(), &vocabulary)?;
    let q2 = quotecmp_core::parse_quote(quote2, extractor_for(quote2)?.as_ref(), &vocabulary)?;

    match output_format {
        "json" => println!("{}", quotecmp_core::compare_quotes_as_json(q1, q2)?),
        _ => output::table::print_comparison(&quotecmp_core::compare_quotes(q1, q2)),
    }

    Ok(())
}
