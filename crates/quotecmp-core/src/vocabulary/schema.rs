use serde::{Deserialize, Serialize};

/// Lookup tables that drive the field rules, as stored in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Known issuers, in priority order for same-position matches.
    #[serde(default)]
    pub carriers: Vec<CarrierDef>,
    /// Controlled coverage vocabulary with synonyms.
    #[serde(default)]
    pub coverages: Vec<CoverageDef>,
    /// Phrases that introduce the premium amount ("Total Annual Premium").
    #[serde(default)]
    pub premium_keywords: Vec<String>,
    /// Headings that open an exclusion list ("Exclusions", "What is Not Covered").
    #[serde(default)]
    pub exclusion_headings: Vec<String>,
    /// Headings that close a running section ("Conditions", "Endorsements").
    #[serde(default)]
    pub section_headings: Vec<String>,
    /// Labels whose value names the issuer when no known carrier matches.
    #[serde(default)]
    pub carrier_labels: Vec<String>,
    /// Labels whose value is the policy period.
    #[serde(default)]
    pub period_labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierDef {
    /// Display name reported as `carrier_name`.
    pub name: String,
    /// Case-insensitive regular expressions.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageDef {
    /// Canonical name; always matches itself.
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl VocabularyDef {
    /// Layer `other` on top of this vocabulary.
    ///
    /// Carriers and coverages with an existing name gain the extra patterns
    /// or aliases; new ones are appended after the existing entries.
    pub fn extend(&mut self, other: VocabularyDef) {
        for carrier in other.carriers {
            match self.carriers.iter_mut().find(|c| c.name == carrier.name) {
                Some(existing) => append_unique(&mut existing.patterns, carrier.patterns),
                None => self.carriers.push(carrier),
            }
        }
        for coverage in other.coverages {
            match self.coverages.iter_mut().find(|c| c.name == coverage.name) {
                Some(existing) => append_unique(&mut existing.aliases, coverage.aliases),
                None => self.coverages.push(coverage),
            }
        }
        append_unique(&mut self.premium_keywords, other.premium_keywords);
        append_unique(&mut self.exclusion_headings, other.exclusion_headings);
        append_unique(&mut self.section_headings, other.section_headings);
        append_unique(&mut self.carrier_labels, other.carrier_labels);
        append_unique(&mut self.period_labels, other.period_labels);
    }
}

fn append_unique(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
