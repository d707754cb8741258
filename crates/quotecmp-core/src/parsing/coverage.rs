use crate::extraction::table::{
    char_column, find_table_regions, header_columns, segments, ColumnRole, TableRegion,
};
use crate::extraction::PageContent;
use crate::normalize::amount::find_limit_token;
use crate::parsing::RawCoverage;
use crate::vocabulary::Vocabulary;
use std::collections::HashSet;

/// Extract coverage lines in document order.
///
/// A line counts when it names a known coverage and has a limit-shaped
/// token after the name. `skip` holds `(page_number, line_index)` pairs
/// already claimed by exclusion sections.
pub fn extract_coverages(
    pages: &[PageContent],
    vocabulary: &Vocabulary,
    skip: &HashSet<(usize, usize)>,
) -> Vec<RawCoverage> {
    let regions = find_table_regions(pages);
    let mut coverages = Vec::new();

    for page in pages {
        for (i, line) in page.lines.iter().enumerate() {
            if skip.contains(&(page.page_number, i))
                || header_columns(line).is_some()
                || vocabulary.find_premium_keyword(line).is_some()
            {
                continue;
            }
            let Some(m) = vocabulary.find_coverage(line) else {
                continue;
            };
            let Some(token) = find_limit_token(line, m.end) else {
                continue;
            };

            let region = regions.iter().find(|r| r.contains(page.page_number, i));
            let cells = match region {
                Some(region) => table_cells(line, m.end, region),
                None => free_text_limit(line, m.end, token).map(|limit| RowCells {
                    limit,
                    deductible: None,
                    premium: None,
                }),
            };
            let Some(RowCells {
                limit,
                deductible,
                premium,
            }) = cells
            else {
                continue;
            };

            tracing::debug!(
                page = page.page_number,
                line = i,
                coverage = m.value,
                limit,
                "coverage line"
            );
            coverages.push(RawCoverage {
                label: line[m.start..m.end].to_string(),
                limit: limit.to_string(),
                deductible: deductible.map(str::to_string),
                premium: premium.map(str::to_string),
                page_number: page.page_number,
                line_index: i,
            });
        }
    }

    coverages
}

/// Limit on a line outside any schedule table: from the token to the end of
/// its column segment.
fn free_text_limit(line: &str, label_end: usize, token: usize) -> Option<&str> {
    // "General Liability premium $1,200" and "Property deductible $2,500"
    // are not limits.
    let between = line[label_end..token].to_lowercase();
    if between.contains("premium") || between.contains("deductible") {
        return None;
    }
    let end = segments(line)
        .iter()
        .map(|s| s.end())
        .find(|end| *end > token)
        .unwrap_or(line.len());
    Some(&line[token..end])
}

struct RowCells<'a> {
    limit: &'a str,
    deductible: Option<&'a str>,
    premium: Option<&'a str>,
}

/// Cells of a schedule row, assigned by the nearest header column.
fn table_cells<'a>(line: &'a str, label_end: usize, region: &TableRegion) -> Option<RowCells<'a>> {
    let mut cells: Vec<(Option<ColumnRole>, &'a str)> = Vec::new();

    for segment in segments(line) {
        let segment_end = segment.end();
        if segment_end <= label_end {
            continue;
        }
        let Some(token) = find_limit_token(line, segment.offset.max(label_end)) else {
            break;
        };
        if token >= segment_end {
            continue;
        }
        let role = region.role_at(char_column(line, token));
        cells.push((role, &line[token..segment_end]));
    }

    let limit = cells
        .iter()
        .find(|(role, _)| *role == Some(ColumnRole::Limit))
        .or_else(|| {
            cells.iter().find(|(role, _)| {
                !matches!(role, Some(ColumnRole::Deductible) | Some(ColumnRole::Premium))
            })
        })
        .map(|(_, text)| *text)?;
    let cell = |wanted: ColumnRole| {
        cells
            .iter()
            .find(|(role, _)| *role == Some(wanted))
            .map(|(_, text)| *text)
    };

    Some(RowCells {
        limit,
        deductible: cell(ColumnRole::Deductible),
        premium: cell(ColumnRole::Premium),
    })
}
