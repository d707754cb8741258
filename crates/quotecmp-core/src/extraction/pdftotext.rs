use crate::error::QuoteError;
use crate::extraction::{BBox, LineSpan, PageContent, PdfExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so schedule tables keep their column alignment,
/// and `-bbox-layout` for line bounding boxes.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, QuoteError> {
        if !pdf_bytes.starts_with(b"%PDF") {
            return Err(QuoteError::UnreadablePdf(
                "missing %PDF header, file is not a PDF or is corrupted".into(),
            ));
        }

        // The temp file lives until the end of this call, error paths included.
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(pdf_bytes)?;
        tmpfile.flush()?;

        let layout = run_pdftotext("-layout", tmpfile.path())?;
        let bbox_lines = parse_bbox_xml(&run_pdftotext("-bbox-layout", tmpfile.path())?);
        tracing::debug!(
            bytes = pdf_bytes.len(),
            bbox_lines = bbox_lines.len(),
            "pdftotext extraction finished"
        );

        // pdftotext uses form feed as page separator
        let pages = layout
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| {
                let page_number = i + 1;
                let lines: Vec<String> = page_text.lines().map(str::to_string).collect();
                let line_spans = attach_bboxes(page_number, &lines, &bbox_lines);
                PageContent {
                    page_number,
                    lines,
                    line_spans,
                }
            })
            .filter(|p| !p.lines.is_empty() || p.page_number == 1)
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Run pdftotext in the given mode and return stdout.
///
/// A non-zero exit means poppler could not open the document (encrypted,
/// damaged xref, truncated stream), which is fatal for that document.
fn run_pdftotext(mode: &str, pdf_path: &Path) -> Result<String, QuoteError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-")
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QuoteError::PdftotextNotFound
            } else {
                QuoteError::Io(e)
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = if stderr.to_lowercase().contains("password") {
            "document is encrypted".to_string()
        } else {
            format!("pdftotext {} exited with {}: {}", mode, code, stderr.trim())
        };
        return Err(QuoteError::UnreadablePdf(reason));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone)]
struct BBoxLine {
    page_number: usize,
    text: String,
    bbox: BBox,
}

/// Collect `<line>` elements of `pdftotext -bbox-layout` XHTML output.
fn parse_bbox_xml(xml: &str) -> Vec<BBoxLine> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = Vec::new();
    let mut page: Option<usize> = None;
    let mut open_line: Option<(BBox, Vec<String>)> = None;
    let mut in_word = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                // Pages carry no number attribute; they come in document order.
                b"page" => page = Some(page.map_or(1, |p| p + 1)),
                b"line" => open_line = line_bbox(&tag).map(|b| (b, Vec::new())),
                b"word" => in_word = true,
                _ => {}
            },
            Ok(Event::Text(text)) if in_word => {
                let word = match text.unescape() {
                    Ok(word) => word.trim().to_string(),
                    Err(_) => String::from_utf8_lossy(&text).trim().to_string(),
                };
                if let Some((_, words)) = open_line.as_mut() {
                    if !word.is_empty() {
                        words.push(word);
                    }
                }
            }
            Ok(Event::End(tag)) => match tag.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let (Some(page_number), Some((bbox, words))) = (page, open_line.take()) {
                        if !words.is_empty() {
                            out.push(BBoxLine {
                                page_number,
                                text: words.join(" "),
                                bbox,
                            });
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                // Bounding boxes are optional; keep what was read so far.
                tracing::debug!(error = %e, "bbox output not fully readable");
                break;
            }
            _ => {}
        }
    }

    out
}

/// Pair each layout line with the first unused bbox line of the same text.
fn attach_bboxes(page_number: usize, lines: &[String], bbox_lines: &[BBoxLine]) -> Vec<LineSpan> {
    let mut used = vec![false; bbox_lines.len()];

    lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            let norm = collapse_ws(line);
            if norm.is_empty() {
                return None;
            }
            let i = bbox_lines.iter().enumerate().position(|(i, b)| {
                !used[i] && b.page_number == page_number && collapse_ws(&b.text) == norm
            })?;
            used[i] = true;
            Some(LineSpan {
                page_number,
                line_index,
                text: line.clone(),
                bbox: bbox_lines[i].bbox.clone(),
            })
        })
        .collect()
}

fn line_bbox(tag: &BytesStart<'_>) -> Option<BBox> {
    let coord = |name: &str| -> Option<f32> {
        let attr = tag.try_get_attribute(name).ok()??;
        std::str::from_utf8(&attr.value).ok()?.parse().ok()
    };
    Some(BBox {
        x_min: coord("xMin")?,
        y_min: coord("yMin")?,
        x_max: coord("xMax")?,
        y_max: coord("yMax")?,
    })
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
