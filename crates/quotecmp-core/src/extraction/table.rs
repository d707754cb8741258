use crate::extraction::PageContent;

/// Column roles a coverage schedule header can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Coverage,
    Limit,
    Deductible,
    Premium,
}

const HEADER_KEYWORDS: &[(&str, ColumnRole)] = &[
    ("coverage", ColumnRole::Coverage),
    ("limit", ColumnRole::Limit),
    ("deductible", ColumnRole::Deductible),
    ("retention", ColumnRole::Deductible),
    ("premium", ColumnRole::Premium),
];

/// A text segment of a layout line.
///
/// `column` counts characters, so glyphs like `’` or `€` keep cells aligned
/// with the header; `offset` is the byte index for slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub column: usize,
    pub offset: usize,
    pub text: &'a str,
}

impl Segment<'_> {
    /// Byte index just past the segment.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Character column of byte index `offset` in `line`.
pub fn char_column(line: &str, offset: usize) -> usize {
    line.get(..offset).map_or(0, |head| head.chars().count())
}

/// Split a line by gaps of 2+ whitespace characters.
///
/// pdftotext -layout pads table cells with runs of spaces, while words
/// inside a cell are separated by single spaces.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut end = 0;
    let mut space_count = 0;

    for (column, (i, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some((col, s)) = start.take() {
                    out.push(Segment {
                        column: col,
                        offset: s,
                        text: &line[s..end],
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some((column, i));
            }
            end = i + c.len_utf8();
            space_count = 0;
        }
    }

    if let Some((col, s)) = start {
        out.push(Segment {
            column: col,
            offset: s,
            text: &line[s..end],
        });
    }

    out
}

/// Header columns of a coverage schedule, e.g.
/// `Coverage            Limit            Deductible     Premium`.
///
/// Returns `None` unless at least two known column titles appear.
pub fn header_columns(line: &str) -> Option<Vec<(usize, ColumnRole)>> {
    let mut columns: Vec<(usize, ColumnRole)> = Vec::new();
    for segment in segments(line) {
        let lower = segment.text.to_lowercase();
        let role = HEADER_KEYWORDS
            .iter()
            .find(|(kw, _)| lower.split_whitespace().any(|w| w.trim_end_matches(['s', ':']) == *kw))
            .map(|(_, role)| *role);
        match role {
            Some(role) => columns.push((segment.column, role)),
            // Headers are short titles; free text means this is not a header.
            None if lower.split_whitespace().count() > 3 => return None,
            None => {}
        }
    }
    if columns.len() >= 2 {
        Some(columns)
    } else {
        None
    }
}

/// A coverage schedule found on a page.
#[derive(Debug, Clone)]
pub struct TableRegion {
    pub page_number: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub columns: Vec<(usize, ColumnRole)>,
}

impl TableRegion {
    pub fn contains(&self, page_number: usize, line_index: usize) -> bool {
        self.page_number == page_number && (self.start_line..self.end_line).contains(&line_index)
    }

    /// Role of the header column closest to character column `column`.
    pub fn role_at(&self, column: usize) -> Option<ColumnRole> {
        self.columns
            .iter()
            .min_by_key(|(c, _)| c.abs_diff(column))
            .map(|(_, role)| *role)
    }
}

/// Find coverage schedule regions: from a header row to the first blank
/// line, page footer, or end of page.
pub fn find_table_regions(pages: &[PageContent]) -> Vec<TableRegion> {
    let mut regions = Vec::new();

    for page in pages {
        let mut open: Option<(usize, Vec<(usize, ColumnRole)>)> = None;

        for (i, line) in page.lines.iter().enumerate() {
            if let Some(columns) = header_columns(line) {
                if let Some((start, cols)) = open.take() {
                    push_region(&mut regions, page.page_number, start, i, cols);
                }
                open = Some((i + 1, columns));
                continue;
            }

            let trimmed = line.trim();
            let ends_table = trimmed.is_empty()
                || trimmed.starts_with("Page ")
                || trimmed.starts_with("---");
            if ends_table {
                if let Some((start, cols)) = open.take() {
                    push_region(&mut regions, page.page_number, start, i, cols);
                }
            }
        }

        if let Some((start, cols)) = open {
            push_region(&mut regions, page.page_number, start, page.lines.len(), cols);
        }
    }

    regions
}

fn push_region(
    regions: &mut Vec<TableRegion>,
    page_number: usize,
    start_line: usize,
    end_line: usize,
    columns: Vec<(usize, ColumnRole)>,
) {
    if end_line > start_line {
        regions.push(TableRegion {
            page_number,
            start_line,
            end_line,
            columns,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_keep_columns() {
        let segs = segments("  General Liability     $1,000,000 per occurrence   $2,500");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text, "General Liability");
        assert_eq!(segs[0].column, 2);
        assert_eq!(segs[1].text, "$1,000,000 per occurrence");
        assert_eq!(segs[2].text, "$2,500");
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let line = "  • Workers’ Comp     €500,000";
        let segs = segments(line);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].column, 2);
        assert_eq!(segs[0].text, "• Workers’ Comp");
        assert_eq!(segs[1].column, 22);
        assert_eq!(segs[1].text, "€500,000");
        assert_eq!(&line[segs[1].offset..segs[1].end()], "€500,000");
        assert_eq!(char_column(line, segs[1].offset), 22);
    }

    #[test]
    fn test_single_spaced_line_is_one_segment() {
        let segs = segments("General Liability: $1,000,000");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "General Liability: $1,000,000");
    }

    #[test]
    fn test_header_columns() {
        let cols = header_columns("  Coverage            Limits           Deductible    Premium").unwrap();
        let roles: Vec<ColumnRole> = cols.iter().map(|(_, r)| *r).collect();
        assert_eq!(
            roles,
            vec![
                ColumnRole::Coverage,
                ColumnRole::Limit,
                ColumnRole::Deductible,
                ColumnRole::Premium
            ]
        );
        assert!(header_columns("  General Liability     $1,000,000").is_none());
        assert!(header_columns("This coverage has a limit that applies per claim").is_none());
    }

    #[test]
    fn test_find_table_regions() {
        let pages = vec![PageContent::from_lines(
            1,
            &[
                "Schedule of Coverages",
                "  Coverage              Limit           Deductible",
                "  General Liability     $1,000,000      $1,000",
                "  Property              $500,000        $2,500",
                "",
                "Exclusions",
            ],
        )];

        let regions = find_table_regions(&pages);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start_line, 2);
        assert_eq!(regions[0].end_line, 4);
        assert!(regions[0].contains(1, 3));
        assert!(!regions[0].contains(1, 4));
        assert_eq!(regions[0].role_at(40), Some(ColumnRole::Deductible));
        assert_eq!(regions[0].role_at(24), Some(ColumnRole::Limit));
    }
}
