use crate::vocabulary::Vocabulary;

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a coverage label to its controlled-vocabulary name.
///
/// Known synonyms ("GL", "Commercial General Liability") resolve to the
/// canonical name; canonical names resolve to themselves. Unknown labels
/// are returned with whitespace collapsed and trailing separators removed.
pub fn canonical_coverage_name(label: &str, vocabulary: &Vocabulary) -> String {
    if let Some(canonical) = vocabulary.canonical_coverage(label) {
        return canonical.to_string();
    }
    collapse_ws(label.trim_end_matches(|c: char| c == ':' || c == '-' || c.is_whitespace()))
}

/// Normalize a limit string for display and comparison.
///
/// - whitespace collapsed, trailing `,` `;` `:` `.` removed
/// - limit wording in canonical casing ("included" -> "Included")
/// - no space between a currency symbol and its amount ("$ 1,000" -> "$1,000")
pub fn normalize_limit(raw: &str) -> String {
    let collapsed = collapse_ws(raw);
    let trimmed = collapsed.trim_end_matches([',', ';', ':', '.']).trim_end();

    match trimmed.to_lowercase().as_str() {
        "included" | "incl" | "incl." => return "Included".to_string(),
        "excluded" | "excl" | "excl." => return "Excluded".to_string(),
        "n/a" | "na" | "not applicable" => return "N/A".to_string(),
        "statutory" | "stat" => return "Statutory".to_string(),
        _ => {}
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if matches!(c, '$' | '€' | '£') {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::builtin::default_vocabulary;

    #[test]
    fn test_synonym_maps_to_canonical() {
        let v = default_vocabulary().unwrap();
        assert_eq!(canonical_coverage_name("GL", &v), "General Liability");
        assert_eq!(
            canonical_coverage_name("Commercial  General   Liability", &v),
            "General Liability"
        );
        assert_eq!(
            canonical_coverage_name("WORKERS' COMPENSATION", &v),
            "Workers Compensation"
        );
    }

    #[test]
    fn test_canonical_name_is_fixed_point() {
        let v = default_vocabulary().unwrap();
        for name in v.coverage_names() {
            assert_eq!(&canonical_coverage_name(name, &v), name);
            let again = canonical_coverage_name(&canonical_coverage_name(name, &v), &v);
            assert_eq!(&again, name);
        }
    }

    #[test]
    fn test_unknown_label_passthrough() {
        let v = default_vocabulary().unwrap();
        assert_eq!(
            canonical_coverage_name("  Drone   Liability: ", &v),
            "Drone Liability"
        );
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit("$ 1,000,000   per occurrence,"), "$1,000,000 per occurrence");
        assert_eq!(normalize_limit("included"), "Included");
        assert_eq!(normalize_limit("n/a"), "N/A");
        assert_eq!(normalize_limit("STATUTORY"), "Statutory");
        assert_eq!(normalize_limit("$1,000,000 / $2,000,000"), "$1,000,000 / $2,000,000");
    }
}
