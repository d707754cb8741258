use crate::parsing::labels::{extract_after_label, Separator};
use crate::parsing::{DocLine, FieldMatch};
use crate::vocabulary::Vocabulary;

/// Identify the issuing carrier.
///
/// A labelled line ("Insurer: ...", "Carrier: ...") naming a known carrier
/// wins outright. Otherwise the earliest line (page, then line order)
/// naming a known carrier wins, leftmost mention first, unless a labelled
/// line comes before it; that label's value is then used as-is.
pub fn find_carrier(lines: &[DocLine<'_>], vocabulary: &Vocabulary) -> Option<FieldMatch> {
    let labelled: Vec<(usize, &DocLine<'_>, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(position, line)| {
            extract_after_label(line.text, vocabulary.carrier_labels(), Separator::Colon)
                .map(|value| (position, line, value))
        })
        .collect();

    if let Some(found) = labelled.iter().find_map(|(_, line, value)| {
        vocabulary
            .find_carrier(value)
            .map(|m| FieldMatch::at(line, m.value))
    }) {
        return Some(found);
    }

    let mention = lines.iter().enumerate().find_map(|(position, line)| {
        vocabulary
            .find_carrier(line.text)
            .map(|m| (position, FieldMatch::at(line, m.value)))
    });

    match (mention, labelled.into_iter().next()) {
        (Some((at, _)), Some((label_at, line, value))) if label_at < at => {
            Some(FieldMatch::at(line, value))
        }
        (Some((_, found)), _) => Some(found),
        (None, Some((_, line, value))) => Some(FieldMatch::at(line, value)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PageContent;
    use crate::parsing::document_lines;
    use crate::vocabulary::builtin::default_vocabulary;

    fn carrier_of(pages: &[PageContent]) -> Option<FieldMatch> {
        let v = default_vocabulary().unwrap();
        find_carrier(&document_lines(pages), &v)
    }

    #[test]
    fn test_known_carrier_in_letterhead() {
        let pages = vec![PageContent::from_lines(
            1,
            &["The Hartford", "Business Owner's Policy Quote"],
        )];
        let found = carrier_of(&pages).unwrap();
        assert_eq!(found.value, "The Hartford");
        assert_eq!(found.line_index, 0);
    }

    #[test]
    fn test_earliest_line_wins() {
        let pages = vec![
            PageContent::from_lines(1, &["Proposal prepared for Acme Bakery", "Chubb"]),
            PageContent::from_lines(2, &["Reinsurance provided by Travelers"]),
        ];
        assert_eq!(carrier_of(&pages).unwrap().value, "Chubb");
    }

    #[test]
    fn test_label_fallback_for_unknown_carrier() {
        let pages = vec![PageContent::from_lines(
            1,
            &["Quote Summary", "Insurance Company: Acme Mutual of Ohio     Page 1"],
        )];
        let found = carrier_of(&pages).unwrap();
        assert_eq!(found.value, "Acme Mutual of Ohio");
        assert_eq!(found.line_index, 1);
    }

    #[test]
    fn test_common_words_are_not_carriers() {
        let pages = vec![PageContent::from_lines(
            1,
            &[
                "Acme Specialty Brokers - Proposal",
                "Coverage territory: nationwide",
                "Insurer: Markel American Insurance Company",
            ],
        )];
        let found = carrier_of(&pages).unwrap();
        assert_eq!(found.value, "Markel");
        assert_eq!(found.line_index, 2);
    }

    #[test]
    fn test_labelled_carrier_beats_earlier_mention() {
        let pages = vec![PageContent::from_lines(
            1,
            &[
                "Proposal prepared by a Chubb appointed agency",
                "Carrier: Hiscox Insurance Company Inc.",
            ],
        )];
        assert_eq!(carrier_of(&pages).unwrap().value, "Hiscox");
    }

    #[test]
    fn test_unknown_label_beats_later_mention() {
        let pages = vec![PageContent::from_lines(
            1,
            &[
                "Insurer: Acme Mutual of Ohio",
                "Reinsured with Chubb",
            ],
        )];
        assert_eq!(carrier_of(&pages).unwrap().value, "Acme Mutual of Ohio");

        let pages = vec![PageContent::from_lines(
            1,
            &["The Hartford", "Underwritten by: Hartford Lloyd's of Texas"],
        )];
        assert_eq!(carrier_of(&pages).unwrap().value, "The Hartford");
    }

    #[test]
    fn test_no_carrier() {
        let pages = vec![PageContent::from_lines(1, &["Quote Summary", "Thank you"])];
        assert!(carrier_of(&pages).is_none());
    }
}
