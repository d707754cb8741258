use crate::error::QuoteError;
use crate::vocabulary::schema::VocabularyDef;
use crate::vocabulary::Vocabulary;

const COMMERCIAL_JSON: &str = include_str!("../../../../vocabulary/commercial.json");

/// Available predefined vocabularies.
pub const PRESETS: &[&str] = &["commercial"];

/// Preset used when the caller does not pick one.
pub const DEFAULT_PRESET: &str = "commercial";

/// Load a predefined vocabulary definition by name.
pub fn load_preset(name: &str) -> Result<VocabularyDef, QuoteError> {
    match name {
        "commercial" => {
            let def: VocabularyDef = serde_json::from_str(COMMERCIAL_JSON)?;
            Ok(def)
        }
        _ => Err(QuoteError::VocabularyInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Compile the default preset.
pub fn default_vocabulary() -> Result<Vocabulary, QuoteError> {
    Vocabulary::compile(&load_preset(DEFAULT_PRESET)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_commercial_preset() {
        let def = load_preset("commercial").unwrap();
        assert!(!def.carriers.is_empty());
        assert!(def.coverages.iter().any(|c| c.name == "General Liability"));
    }

    #[test]
    fn test_commercial_preset_compiles() {
        let vocab = default_vocabulary().unwrap();
        assert_eq!(vocab.canonical_coverage("GL"), Some("General Liability"));
        assert_eq!(
            vocab.canonical_coverage("workers' comp"),
            Some("Workers Compensation")
        );
        assert!(vocab.carrier_names().contains(&"Travelers"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("marine").is_err());
    }
}
