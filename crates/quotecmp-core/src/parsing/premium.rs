use crate::normalize::amount::find_amount;
use crate::parsing::{DocLine, FieldMatch};
use crate::vocabulary::Vocabulary;
use regex::Regex;
use std::sync::LazyLock;

static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:total|annual)\b").expect("qualifier pattern is valid"));

struct Candidate {
    found: FieldMatch,
    position: usize,
}

/// Locate the annual premium amount.
///
/// Every line with a premium keyword yields at most one candidate: the first
/// currency token after the keyword, or else the first one on the next
/// non-blank line of the same page ("Total Premium" as a label above the
/// figure). The candidate closest to a "Total"/"Annual" qualifier wins;
/// equal distances go to the earlier candidate. A qualifier only counts on
/// a keyword line or right next to one, so "Total Insured Value" elsewhere
/// does not pull the choice.
pub fn find_premium(lines: &[DocLine<'_>], vocabulary: &Vocabulary) -> Option<FieldMatch> {
    let mut candidates = Vec::new();
    let mut keyword_lines = Vec::new();

    for (position, line) in lines.iter().enumerate() {
        let Some(keyword) = vocabulary.find_premium_keyword(line.text) else {
            continue;
        };
        keyword_lines.push(position);

        if let Some((s, e)) = find_amount(line.text, keyword.end) {
            candidates.push(Candidate {
                found: FieldMatch::at(line, &line.text[s..e]),
                position,
            });
            continue;
        }

        let next = lines[position + 1..]
            .iter()
            .take_while(|l| l.page_number == line.page_number)
            .find(|l| !l.text.trim().is_empty());
        if let Some(next) = next {
            if let Some((s, e)) = find_amount(next.text, 0) {
                candidates.push(Candidate {
                    found: FieldMatch::at(next, &next.text[s..e]),
                    position,
                });
            }
        }
    }

    let qualified: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(i, l)| {
            QUALIFIER.is_match(l.text) && keyword_lines.iter().any(|k| k.abs_diff(*i) <= 1)
        })
        .map(|(i, _)| i)
        .collect();

    if candidates.len() > 1 {
        tracing::debug!(candidates = candidates.len(), "several premium candidates");
    }

    candidates
        .into_iter()
        .min_by_key(|c| {
            qualified
                .iter()
                .map(|q| q.abs_diff(c.position))
                .min()
                .unwrap_or(usize::MAX)
        })
        .map(|c| c.found)
}
