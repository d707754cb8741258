use quotecmp_core::error::QuoteError;
use quotecmp_core::vocabulary::{builtin, load_vocabulary, Vocabulary};
use std::path::Path;

pub fn list() -> Result<(), QuoteError> {
    println!("Available built-in vocabularies:\n");
    for name in builtin::PRESETS {
        let def = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<12} {} (v{}){}", name, def.name, def.version, default_marker);
        if let Some(ref desc) = def.description {
            println!("               {}", desc);
        }
        println!(
            "               {} carriers, {} coverage names",
            def.carriers.len(),
            def.coverages.len()
        );
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), QuoteError> {
    let def = builtin::load_preset(preset)?;

    println!("{} (version {})\n", def.name, def.version);
    if let Some(ref desc) = def.description {
        println!("{}\n", desc);
    }

    println!("Coverage names and the labels that map to them:\n");
    let max_name_len = def
        .coverages
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(20);
    for coverage in &def.coverages {
        let aliases = if coverage.aliases.is_empty() {
            "-".to_string()
        } else {
            coverage.aliases.join(", ")
        };
        println!(
            "  {:<width$}  {}",
            coverage.name,
            aliases,
            width = max_name_len
        );
    }
    println!();

    println!("Known carriers ({}):\n", def.carriers.len());
    for carrier in &def.carriers {
        println!("  {}", carrier.name);
    }
    println!();

    println!("Premium keywords:   {}", def.premium_keywords.join(", "));
    println!("Exclusion headings: {}", def.exclusion_headings.join(", "));
    println!("Section headings:   {}", def.section_headings.join(", "));
    println!("Carrier labels:     {}", def.carrier_labels.join(", "));
    println!("Period labels:      {}", def.period_labels.join(", "));
    println!();

    Ok(())
}

pub fn schema() -> Result<(), QuoteError> {
    print!(
        r#"JSON Vocabulary Schema
======================

A vocabulary file teaches quotecmp new carriers, coverage synonyms and
section wording. Pass it with `--vocabulary FILE` to `parse` or `compare`;
it extends the built-in vocabulary rather than replacing it.

Top-level fields:
  name                (string, required)  Human-readable name
  description         (string, optional)  What this vocabulary is for
  version             (string, required)  Version identifier (e.g., "2026.1")
  carriers            (array, optional)   Known issuers (see below)
  coverages           (array, optional)   Controlled coverage names (see below)
  premium_keywords    (array, optional)   Phrases introducing the premium amount
  exclusion_headings  (array, optional)   Headings that open an exclusion list
  section_headings    (array, optional)   Headings that close an exclusion list
  carrier_labels      (array, optional)   Labels like "Insurer" whose value
                                          names the carrier
  period_labels       (array, optional)   Labels like "Policy Term"

Each entry in "carriers":
  name                (string, required)  Name reported as carrier_name
  patterns            (array, required)   Case-insensitive regular expressions.
                                          A carrier that already exists gains
                                          the extra patterns.

Each entry in "coverages":
  name                (string, required)  Canonical coverage name, used to
                                          align the two quotes
  aliases             (array, optional)   Other labels for the same coverage.
                                          Matching ignores case, apostrophes,
                                          punctuation and extra whitespace.
  note                (string, optional)  Free-form remark

Example:
{{
  "name": "Regional carriers",
  "version": "1.0",
  "carriers": [
    {{ "name": "Acme Mutual", "patterns": ["\\bacme\\s+mutual\\b"] }}
  ],
  "coverages": [
    {{ "name": "Cyber Liability", "aliases": ["Digital Risk"] }},
    {{ "name": "Spoilage", "aliases": ["Food Spoilage", "Refrigerated Property"] }}
  ],
  "premium_keywords": ["Total Investment"]
}}

An alias may map to only one coverage name; `quotecmp vocabulary validate`
reports conflicts with the built-in vocabulary.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), QuoteError> {
    let def = load_vocabulary(file)?;

    println!("Vocabulary '{}' (v{}) is valid.", def.name, def.version);
    println!("  Carriers: {}", def.carriers.len());
    println!("  Coverages: {}", def.coverages.len());

    let base = builtin::load_preset(builtin::DEFAULT_PRESET)?;
    let new_names: Vec<String> = def
        .coverages
        .iter()
        .filter(|c| !base.coverages.iter().any(|b| b.name == c.name))
        .map(|c| c.name.clone())
        .collect();

    let mut merged = base;
    merged.extend(def);
    Vocabulary::compile(&merged)?;
    println!("  Compatible with the '{}' vocabulary.", builtin::DEFAULT_PRESET);

    // New names only align with quotes parsed using this file too.
    if !new_names.is_empty() {
        println!("\nNew coverage names:");
        for name in &new_names {
            println!("  - {}", name);
        }
    }

    Ok(())
}
