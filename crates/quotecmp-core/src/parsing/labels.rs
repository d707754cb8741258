use crate::parsing::{DocLine, FieldMatch};
use crate::vocabulary::Vocabulary;

/// Whether a label must be followed by a colon for its value to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Colon,
    Optional,
}

/// Extract a value appearing after one of `labels` (lowercase, matched
/// case-insensitively at a word start).
///
/// Handles "Label: value" and, with `Separator::Optional`, "Label    value".
/// Truncates at the next large whitespace gap (3+ spaces) to avoid capturing
/// trailing fields from pdftotext -layout output.
pub fn extract_after_label(line: &str, labels: &[String], separator: Separator) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `line`.
    let lower = line.to_ascii_lowercase();

    for label in labels {
        for (idx, _) in lower.match_indices(label.as_str()) {
            let end = idx + label.len();
            if !at_word_boundary(&lower, idx, end) {
                continue;
            }
            let after = line[end..].trim_start();
            let after = match (after.strip_prefix(':'), separator) {
                (Some(rest), _) => rest,
                (None, Separator::Optional) => after,
                (None, Separator::Colon) => continue,
            };
            let trimmed = after.trim_start();
            let value = match trimmed.find("   ") {
                Some(gap_pos) => trimmed[..gap_pos].trim(),
                None => trimmed.trim(),
            };
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn at_word_boundary(lower: &str, start: usize, end: usize) -> bool {
    let before = lower[..start].chars().next_back();
    let after = lower[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// First labelled policy period ("Policy Period: 01/01/2026 - 01/01/2027").
pub fn find_policy_period(lines: &[DocLine<'_>], vocabulary: &Vocabulary) -> Option<FieldMatch> {
    lines.iter().find_map(|line| {
        extract_after_label(line.text, vocabulary.period_labels(), Separator::Optional)
            .map(|value| FieldMatch::at(line, value))
    })
}
