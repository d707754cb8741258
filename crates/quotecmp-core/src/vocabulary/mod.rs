pub mod builtin;
pub mod schema;

use crate::error::QuoteError;
use regex::{Regex, RegexBuilder};
use schema::VocabularyDef;
use std::collections::HashMap;
use std::path::Path;

/// Load a vocabulary definition from a JSON file.
pub fn load_vocabulary(path: &Path) -> Result<VocabularyDef, QuoteError> {
    let content = std::fs::read_to_string(path).map_err(|e| QuoteError::VocabularyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_vocabulary(&content, path)
}

/// Parse a vocabulary definition from a JSON string.
pub fn parse_vocabulary(json: &str, source: &Path) -> Result<VocabularyDef, QuoteError> {
    let def: VocabularyDef = serde_json::from_str(json).map_err(|e| QuoteError::VocabularyLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_vocabulary(&def)?;
    Ok(def)
}

/// Parse a vocabulary definition from a JSON string (no file path context).
pub fn parse_vocabulary_str(json: &str) -> Result<VocabularyDef, QuoteError> {
    let def: VocabularyDef = serde_json::from_str(json)?;
    validate_vocabulary(&def)?;
    Ok(def)
}

/// Validate that a vocabulary definition is well-formed.
///
/// Extension files may leave any table empty; only what is present is checked.
pub fn validate_vocabulary(def: &VocabularyDef) -> Result<(), QuoteError> {
    if def.name.trim().is_empty() {
        return Err(QuoteError::VocabularyInvalid(
            "vocabulary name must not be empty".into(),
        ));
    }

    for carrier in &def.carriers {
        if carrier.name.trim().is_empty() {
            return Err(QuoteError::VocabularyInvalid(
                "carrier name must not be empty".into(),
            ));
        }
        if carrier.patterns.is_empty() {
            return Err(QuoteError::VocabularyInvalid(format!(
                "carrier '{}' has no patterns",
                carrier.name
            )));
        }
        for pattern in &carrier.patterns {
            compile_pattern(pattern).map_err(|e| {
                QuoteError::VocabularyInvalid(format!(
                    "carrier '{}' has invalid pattern '{}': {}",
                    carrier.name, pattern, e
                ))
            })?;
        }
    }

    let mut owners: HashMap<String, &str> = HashMap::new();
    for coverage in &def.coverages {
        if label_key(&coverage.name).is_empty() {
            return Err(QuoteError::VocabularyInvalid(
                "coverage name must not be empty".into(),
            ));
        }
        for label in std::iter::once(&coverage.name).chain(&coverage.aliases) {
            let key = label_key(label);
            if key.is_empty() {
                return Err(QuoteError::VocabularyInvalid(format!(
                    "coverage '{}' has an empty alias",
                    coverage.name
                )));
            }
            if let Some(owner) = owners.insert(key, coverage.name.as_str()) {
                if owner != coverage.name {
                    return Err(QuoteError::VocabularyInvalid(format!(
                        "alias '{}' maps to both '{}' and '{}'",
                        label, owner, coverage.name
                    )));
                }
            }
        }
    }

    let phrase_lists = [
        ("premium_keywords", &def.premium_keywords),
        ("exclusion_headings", &def.exclusion_headings),
        ("section_headings", &def.section_headings),
        ("carrier_labels", &def.carrier_labels),
        ("period_labels", &def.period_labels),
    ];
    for (field, phrases) in phrase_lists {
        if phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(QuoteError::VocabularyInvalid(format!(
                "{} must not contain empty entries",
                field
            )));
        }
    }

    Ok(())
}

/// Lookup key for coverage labels: lowercase, apostrophes dropped,
/// punctuation other than `&` and `/` turned into spaces, whitespace collapsed.
///
/// "Workers' Compensation", "WORKERS COMPENSATION" and
/// "workers  compensation" share one key.
pub fn label_key(label: &str) -> String {
    let cleaned: String = label
        .to_lowercase()
        .chars()
        .filter(|c| *c != '\'' && *c != '’')
        .map(|c| {
            if c.is_alphanumeric() || c == '&' || c == '/' {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Case-insensitive regex matching `phrase` as whole words, tolerant of
/// layout whitespace, optional apostrophes and hyphen/space variation.
fn phrase_regex(phrase: &str) -> Result<Regex, regex::Error> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '\'' | '’' => "['’]?".to_string(),
                    '-' => r"[-\s]?".to_string(),
                    _ => regex::escape(&c.to_string()),
                })
                .collect()
        })
        .collect();
    let body = words.join(r"\s+");

    let starts_word = phrase.trim().chars().next().is_some_and(char::is_alphanumeric);
    let ends_word = phrase.trim().chars().last().is_some_and(char::is_alphanumeric);
    let pattern = format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        body,
        if ends_word { r"\b" } else { "" }
    );
    compile_pattern(&pattern)
}

/// Byte range of a phrase match within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'v> {
    /// Canonical value the phrase stands for (carrier or coverage name,
    /// or the keyword itself).
    pub value: &'v str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug)]
struct Phrase {
    value: String,
    regex: Regex,
}

/// Compiled, immutable vocabulary shared by every parse.
#[derive(Debug)]
pub struct Vocabulary {
    pub name: String,
    pub version: String,
    carriers: Vec<Phrase>,
    coverage_aliases: Vec<Phrase>,
    coverage_names: Vec<String>,
    alias_index: HashMap<String, String>,
    premium_keywords: Vec<Phrase>,
    exclusion_headings: Vec<Phrase>,
    section_headings: Vec<String>,
    carrier_labels: Vec<String>,
    period_labels: Vec<String>,
}

impl Vocabulary {
    /// Validate and compile a definition.
    pub fn compile(def: &VocabularyDef) -> Result<Vocabulary, QuoteError> {
        validate_vocabulary(def)?;
        let invalid = |what: &str, e: regex::Error| {
            QuoteError::VocabularyInvalid(format!("cannot compile {}: {}", what, e))
        };

        let mut carriers = Vec::new();
        for carrier in &def.carriers {
            for pattern in &carrier.patterns {
                carriers.push(Phrase {
                    value: carrier.name.clone(),
                    regex: compile_pattern(pattern).map_err(|e| invalid(pattern.as_str(), e))?,
                });
            }
        }

        let mut coverage_aliases = Vec::new();
        let mut alias_index = HashMap::new();
        for coverage in &def.coverages {
            for label in std::iter::once(&coverage.name).chain(&coverage.aliases) {
                alias_index.insert(label_key(label), coverage.name.clone());
                coverage_aliases.push(Phrase {
                    value: coverage.name.clone(),
                    regex: phrase_regex(label).map_err(|e| invalid(label.as_str(), e))?,
                });
            }
        }

        let keyword_phrases = |phrases: &[String]| -> Result<Vec<Phrase>, QuoteError> {
            phrases
                .iter()
                .map(|p| {
                    Ok(Phrase {
                        value: p.clone(),
                        regex: phrase_regex(p).map_err(|e| invalid(p.as_str(), e))?,
                    })
                })
                .collect()
        };

        Ok(Vocabulary {
            name: def.name.clone(),
            version: def.version.clone(),
            carriers,
            coverage_aliases,
            coverage_names: def.coverages.iter().map(|c| c.name.clone()).collect(),
            alias_index,
            premium_keywords: keyword_phrases(&def.premium_keywords)?,
            exclusion_headings: keyword_phrases(&def.exclusion_headings)?,
            section_headings: def.section_headings.iter().map(|h| label_key(h)).collect(),
            carrier_labels: def.carrier_labels.iter().map(|l| l.to_lowercase()).collect(),
            period_labels: def.period_labels.iter().map(|l| l.to_lowercase()).collect(),
        })
    }

    /// Leftmost known carrier in `line`; same-position ties go to the
    /// carrier listed first.
    pub fn find_carrier(&self, line: &str) -> Option<PhraseMatch<'_>> {
        leftmost(&self.carriers, line, false)
    }

    /// Leftmost coverage alias in `line`, preferring the longest alias at
    /// that position ("Property Damage" over "Property").
    pub fn find_coverage(&self, line: &str) -> Option<PhraseMatch<'_>> {
        leftmost(&self.coverage_aliases, line, true)
    }

    pub fn find_premium_keyword(&self, line: &str) -> Option<PhraseMatch<'_>> {
        leftmost(&self.premium_keywords, line, true)
    }

    pub fn find_exclusion_heading(&self, line: &str) -> Option<PhraseMatch<'_>> {
        leftmost(&self.exclusion_headings, line, true)
    }

    /// True when the line opens with one of the configured section headings.
    pub fn starts_section(&self, line: &str) -> bool {
        let key = label_key(line);
        self.section_headings
            .iter()
            .any(|h| key == *h || key.starts_with(&format!("{} ", h)))
    }

    /// True when the whole line is one of the configured section headings.
    pub fn is_section_heading(&self, line: &str) -> bool {
        let key = label_key(line);
        self.section_headings.iter().any(|h| key == *h)
    }

    /// Canonical coverage name for a label, if the label is a known synonym.
    pub fn canonical_coverage(&self, label: &str) -> Option<&str> {
        self.alias_index.get(&label_key(label)).map(String::as_str)
    }

    pub fn coverage_names(&self) -> &[String] {
        &self.coverage_names
    }

    pub fn carrier_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for c in &self.carriers {
            if !names.contains(&c.value.as_str()) {
                names.push(&c.value);
            }
        }
        names
    }

    pub fn carrier_labels(&self) -> &[String] {
        &self.carrier_labels
    }

    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }
}

fn leftmost<'v>(phrases: &'v [Phrase], line: &str, prefer_longest: bool) -> Option<PhraseMatch<'v>> {
    let mut best: Option<PhraseMatch<'v>> = None;
    for phrase in phrases {
        let Some(m) = phrase.regex.find(line) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(b) => {
                m.start() < b.start
                    || (prefer_longest && m.start() == b.start && m.end() > b.end)
            }
        };
        if better {
            best = Some(PhraseMatch {
                value: &phrase.value,
                start: m.start(),
                end: m.end(),
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(json: &str) -> Vocabulary {
        Vocabulary::compile(&parse_vocabulary_str(json).unwrap()).unwrap()
    }

    const SMALL: &str = r#"{
        "name": "Test",
        "version": "1",
        "carriers": [
            { "name": "Travelers", "patterns": ["\\btravelers\\b"] },
            { "name": "Chubb", "patterns": ["\\bchubb\\b"] }
        ],
        "coverages": [
            { "name": "Property", "aliases": ["Commercial Property"] },
            { "name": "Property Damage", "aliases": ["PD"] },
            { "name": "Workers Compensation", "aliases": ["Workers' Comp", "WC"] }
        ],
        "premium_keywords": ["Total Premium", "Total Annual Premium", "Annual Premium"],
        "exclusion_headings": ["Exclusions"],
        "section_headings": ["Conditions"]
    }"#;

    #[test]
    fn test_parse_valid_vocabulary() {
        let def = parse_vocabulary_str(SMALL).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.carriers.len(), 2);
        assert_eq!(def.coverages.len(), 3);
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"{ "name": " ", "version": "1" }"#;
        assert!(parse_vocabulary_str(json).is_err());
    }

    #[test]
    fn test_invalid_carrier_pattern_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1",
            "carriers": [ { "name": "Broken", "patterns": ["(unclosed"] } ]
        }"#;
        assert!(matches!(
            parse_vocabulary_str(json),
            Err(QuoteError::VocabularyInvalid(_))
        ));
    }

    #[test]
    fn test_conflicting_alias_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1",
            "coverages": [
                { "name": "General Liability", "aliases": ["GL"] },
                { "name": "Garage Liability", "aliases": ["gl"] }
            ]
        }"#;
        let err = parse_vocabulary_str(json).unwrap_err();
        assert!(err.to_string().contains("maps to both"));
    }

    #[test]
    fn test_label_key() {
        assert_eq!(label_key("Workers' Compensation"), "workers compensation");
        assert_eq!(label_key("  WORKERS   COMPENSATION: "), "workers compensation");
        assert_eq!(label_key("Hired & Non-Owned Auto"), "hired & non owned auto");
    }

    #[test]
    fn test_find_coverage_prefers_longest_at_same_start() {
        let v = vocab(SMALL);
        let m = v.find_coverage("Property Damage   $100,000").unwrap();
        assert_eq!(m.value, "Property Damage");
        let m = v.find_coverage("  Commercial Property   $500,000").unwrap();
        assert_eq!(m.value, "Property");
        assert_eq!(m.start, 2);
    }

    #[test]
    fn test_find_coverage_whole_words_only() {
        let v = vocab(SMALL);
        assert!(v.find_coverage("Propertyless text").is_none());
        assert!(v.find_coverage("OPD schedule").is_none());
        assert_eq!(v.find_coverage("wc  Statutory").unwrap().value, "Workers Compensation");
    }

    #[test]
    fn test_apostrophe_variants_match() {
        let v = vocab(SMALL);
        assert!(v.find_coverage("Workers Comp   Statutory").is_some());
        assert!(v.find_coverage("Workers’ Comp   Statutory").is_some());
    }

    #[test]
    fn test_find_carrier_leftmost() {
        let v = vocab(SMALL);
        let m = v.find_carrier("Chubb, reinsured by Travelers").unwrap();
        assert_eq!(m.value, "Chubb");
        assert!(v.find_carrier("no issuer here").is_none());
    }

    #[test]
    fn test_canonical_coverage_lookup() {
        let v = vocab(SMALL);
        assert_eq!(v.canonical_coverage("pd"), Some("Property Damage"));
        assert_eq!(v.canonical_coverage("Property Damage"), Some("Property Damage"));
        assert_eq!(v.canonical_coverage("Cyber"), None);
    }

    #[test]
    fn test_starts_section() {
        let v = vocab(SMALL);
        assert!(v.starts_section("CONDITIONS"));
        assert!(v.starts_section("Conditions of coverage:"));
        assert!(!v.starts_section("Conditional items"));
        assert!(v.is_section_heading("Conditions:"));
        assert!(!v.is_section_heading("Conditions of coverage"));
    }

    #[test]
    fn test_extend_merges_aliases_and_appends_carriers() {
        let mut base = parse_vocabulary_str(SMALL).unwrap();
        let extra = parse_vocabulary_str(
            r#"{
                "name": "Extra", "version": "1",
                "carriers": [ { "name": "Acme Mutual", "patterns": ["acme\\s+mutual"] } ],
                "coverages": [ { "name": "Property", "aliases": ["Bldg"] } ]
            }"#,
        )
        .unwrap();
        base.extend(extra);
        assert_eq!(base.carriers.len(), 3);
        assert_eq!(base.carriers[2].name, "Acme Mutual");
        let v = Vocabulary::compile(&base).unwrap();
        assert_eq!(v.canonical_coverage("BLDG"), Some("Property"));
    }
}
