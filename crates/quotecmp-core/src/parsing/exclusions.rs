use crate::extraction::table::{find_table_regions, segments};
use crate::extraction::PageContent;
use crate::normalize::amount::find_limit_token;
use crate::vocabulary::Vocabulary;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Bulleted or numbered list item; group 1 is the item text.
static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[•●▪◦‣·*–—-]|o|\(?\d{1,2}[.)]|\(?[A-Za-z][.)])\s+(\S.*)$")
        .expect("bullet pattern is valid")
});

const MAX_HEADER_CHARS: usize = 60;

/// Exclusion items and the lines they were read from.
#[derive(Debug, Default)]
pub struct ExclusionSections {
    pub items: Vec<String>,
    /// `(page_number, line_index)` of every consumed line.
    pub lines: HashSet<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    /// Right after the header, before any item.
    Header,
    Bulleted,
    Plain,
    /// Past a blank line that followed bulleted items; only bullets count.
    Trailing,
}

/// Collect exclusion items from every exclusion section.
///
/// A section opens at a short, unbulleted line that starts with an exclusion
/// heading and closes at the next section header or the end of the page.
/// Rows of a coverage schedule never open a section.
pub fn extract_exclusions(pages: &[PageContent], vocabulary: &Vocabulary) -> ExclusionSections {
    let regions = find_table_regions(pages);
    let mut out = ExclusionSections::default();

    for page in pages {
        let mut state = State::Outside;

        for (i, line) in page.lines.iter().enumerate() {
            let key = (page.page_number, i);
            let in_table = regions.iter().any(|r| r.contains(page.page_number, i));
            let header = if in_table {
                None
            } else {
                exclusion_header(line, vocabulary)
            };

            if let Some(inline) = header {
                tracing::debug!(page = page.page_number, line = i, "exclusion section");
                out.lines.insert(key);
                state = if inline.is_empty() {
                    State::Header
                } else {
                    out.items.extend(inline);
                    State::Trailing
                };
                continue;
            }
            if state == State::Outside {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                if state == State::Bulleted {
                    state = State::Trailing;
                }
                continue;
            }

            if let Some(caps) = BULLET.captures(line) {
                let item = caps[1].trim();
                // "3. CONDITIONS" numbers the next section, not an item.
                if vocabulary.is_section_heading(item) {
                    state = State::Outside;
                    continue;
                }
                out.items.push(item.to_string());
                out.lines.insert(key);
                state = State::Bulleted;
                continue;
            }

            if is_section_header(trimmed, vocabulary) {
                state = State::Outside;
                continue;
            }

            match state {
                State::Header | State::Plain => {
                    out.items.push(trimmed.to_string());
                    out.lines.insert(key);
                    state = State::Plain;
                }
                State::Bulleted => {
                    if let Some(last) = out.items.last_mut() {
                        last.push(' ');
                        last.push_str(trimmed);
                    }
                    out.lines.insert(key);
                }
                State::Trailing | State::Outside => {}
            }
        }
    }

    out
}

/// If `line` opens an exclusion section, the items listed inline after a
/// colon ("Exclusions: Flood; Earthquake"), possibly none.
///
/// The heading must be the whole text before the colon, so a schedule row
/// such as `Flood      Not Covered` is not a header.
fn exclusion_header(line: &str, vocabulary: &Vocabulary) -> Option<Vec<String>> {
    let trimmed = line.trim();
    let (heading, rest) = match trimmed.split_once(':') {
        Some((heading, rest)) => (heading.trim_end(), rest),
        None => (trimmed, ""),
    };

    if heading.chars().count() > MAX_HEADER_CHARS
        || BULLET.is_match(heading)
        || segments(heading).len() > 1
        || find_limit_token(heading, 0).is_some()
    {
        return None;
    }
    let found = vocabulary.find_exclusion_heading(heading)?;
    if found.start != 0 || !heading[found.end..].trim().is_empty() {
        return None;
    }

    let separator = if rest.contains(';') { ';' } else { ',' };
    Some(
        rest.split(separator)
            .map(|item| {
                let item = item.trim();
                item.strip_prefix("and ").unwrap_or(item).trim()
            })
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// A heading that starts some other section of the quote.
fn is_section_header(trimmed: &str, vocabulary: &Vocabulary) -> bool {
    if trimmed.ends_with(':') || vocabulary.starts_section(trimmed) {
        return true;
    }
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::builtin::default_vocabulary;

    fn exclusions_of(lines: &[&str]) -> ExclusionSections {
        let v = default_vocabulary().unwrap();
        extract_exclusions(&[PageContent::from_lines(1, lines)], &v)
    }

    #[test]
    fn test_bulleted_section() {
        let ex = exclusions_of(&[
            "Key Exclusions",
            "  • Flood",
            "  • Earthquake and earth movement",
            "  - Mold",
        ]);
        assert_eq!(ex.items, vec!["Flood", "Earthquake and earth movement", "Mold"]);
        assert_eq!(ex.lines.len(), 4);
    }

    #[test]
    fn test_numbered_and_wrapped_items() {
        let ex = exclusions_of(&[
            "Exclusions:",
            "1. Pollution, including gradual release of",
            "   contaminants",
            "2) Professional services",
        ]);
        assert_eq!(
            ex.items,
            vec![
                "Pollution, including gradual release of contaminants",
                "Professional services"
            ]
        );
    }

    #[test]
    fn test_plain_lines_after_header() {
        let ex = exclusions_of(&["What is Not Covered", "War", "Nuclear hazard"]);
        assert_eq!(ex.items, vec!["War", "Nuclear hazard"]);
    }

    #[test]
    fn test_section_ends_at_next_heading() {
        let ex = exclusions_of(&[
            "EXCLUSIONS",
            "• Flood",
            "CONDITIONS",
            "• Premium audit applies",
            "Subjectivities",
            "Signed application",
        ]);
        assert_eq!(ex.items, vec!["Flood"]);
    }

    #[test]
    fn test_prose_after_list_is_ignored() {
        let ex = exclusions_of(&[
            "Exclusions",
            "• Flood",
            "",
            "This quote is valid for 30 days.",
        ]);
        assert_eq!(ex.items, vec!["Flood"]);
        assert!(!ex.lines.contains(&(1, 3)));
    }

    #[test]
    fn test_inline_list() {
        let ex = exclusions_of(&["Exclusions: Flood; Earthquake; Terrorism"]);
        assert_eq!(ex.items, vec!["Flood", "Earthquake", "Terrorism"]);
        let ex = exclusions_of(&["Exclusions: Flood, Earthquake, and Mold"]);
        assert_eq!(ex.items, vec!["Flood", "Earthquake", "Mold"]);
    }

    #[test]
    fn test_inline_items_may_mention_limit_words() {
        let ex = exclusions_of(&["Exclusions: Flood and earthquake losses are excluded"]);
        assert_eq!(ex.items, vec!["Flood and earthquake losses are excluded"]);
        let ex = exclusions_of(&["Exclusions: Mold; Terrorism per form IL 09 85 01.15; N/A for BPP"]);
        assert_eq!(ex.items.len(), 3);
    }

    #[test]
    fn test_numbered_section_heading_ends_list() {
        let ex = exclusions_of(&[
            "Exclusions",
            "1. Flood",
            "2. Earthquake",
            "3. CONDITIONS",
            "Cancellation requires 30 days written notice to the insurer.",
            "4. SUBJECTIVITIES",
            "Signed application prior to binding",
        ]);
        assert_eq!(ex.items, vec!["Flood", "Earthquake"]);
        assert!(!ex.lines.contains(&(1, 4)));
    }

    #[test]
    fn test_not_covered_cell_is_not_a_header() {
        let ex = exclusions_of(&[
            "General Liability   $1,000,000",
            "Flood               Not Covered",
            "Property            $500,000",
        ]);
        assert!(ex.items.is_empty());
        assert!(ex.lines.is_empty());

        let ex = exclusions_of(&["Flood damage is Not Covered", "Property  $500,000"]);
        assert!(ex.items.is_empty());
    }

    #[test]
    fn test_schedule_rows_never_open_a_section() {
        let ex = exclusions_of(&[
            "  Coverage              Limit",
            "  General Liability     $1,000,000",
            "  Exclusions",
            "  Property              $500,000",
        ]);
        assert!(ex.items.is_empty());
    }

    #[test]
    fn test_section_does_not_cross_pages() {
        let v = default_vocabulary().unwrap();
        let pages = vec![
            PageContent::from_lines(1, &["Exclusions", "• Flood"]),
            PageContent::from_lines(2, &["General Liability continues here"]),
        ];
        let ex = extract_exclusions(&pages, &v);
        assert_eq!(ex.items, vec!["Flood"]);
    }

    #[test]
    fn test_no_section() {
        let ex = exclusions_of(&["General Liability   $1,000,000", "Total Premium $900.00"]);
        assert!(ex.items.is_empty());
        assert!(ex.lines.is_empty());
    }

    #[test]
    fn test_long_sentence_is_not_a_header() {
        let ex = exclusions_of(&[
            "Please review the policy exclusions carefully before binding this quote with us",
            "Flood",
        ]);
        assert!(ex.items.is_empty());
    }
}
