//! PDF reader with positional layout reconstruction.
//!
//! Each page's content stream is walked for text runs (with their text-
//! matrix position), rectangles and image placements. Rectangle grids are
//! promoted to tables; everything is rendered in reading order by the page
//! layout machinery. Documents that yield no positioned text at all (scans,
//! exotic encodings) fall back to plain text extraction.

use super::Reader;
use crate::error::{ExtractError, ExtractResult};
use crate::layout::{render_page, PositionedObject};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use std::path::Path;
use tracing::{debug, warn};

/// Rects closer than this (in points) belong to the same grid; positions
/// closer than this share a line, row or column.
const GRID_TOLERANCE: f64 = 3.0;
const BIN_TOLERANCE: f64 = 2.0;

pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for PdfReader {
    fn read(&self, path: &Path) -> ExtractResult<String> {
        let doc = Document::load(path).map_err(|e| ExtractError::ReaderFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let document_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        let mut out = String::new();
        out.push_str(&format!("# Document: {document_name}\n\n"));

        let mut saw_text = false;
        for (page_number, page_id) in doc.get_pages() {
            // A page that cannot be decoded still contributes its section.
            out.push_str(&format!("## Page {page_number}\n\n"));

            let page = match PageObjects::collect(&doc, page_id) {
                Ok(page) => page,
                Err(message) => {
                    warn!("Could not decode page {page_number} of {document_name}: {message}");
                    continue;
                }
            };
            if page.has_text() {
                saw_text = true;
            }
            out.push_str(&render_page(&mut page.into_positioned()));
        }

        if !saw_text {
            debug!("No positioned text in {document_name}; trying plain extraction");
            if let Ok(text) = pdf_extract::extract_text(path) {
                if !text.trim().is_empty() {
                    return Ok(clean_extracted(&text));
                }
            }
        }

        Ok(out)
    }
}

/// A text run at its page position. `top` grows downward from the page top.
#[derive(Debug, Clone)]
struct TextRun {
    x: f64,
    top: f64,
    text: String,
}

/// A rectangle in top-down page coordinates.
#[derive(Debug, Clone, Copy)]
struct RectObj {
    x0: f64,
    top: f64,
    x1: f64,
    bottom: f64,
}

/// Everything collected from one page's content stream.
struct PageObjects {
    runs: Vec<TextRun>,
    rects: Vec<RectObj>,
    images: Vec<(f64, String)>,
}

impl PageObjects {
    fn collect(doc: &Document, page_id: (u32, u16)) -> Result<Self, String> {
        let height = page_height(doc, page_id);
        let data = doc.get_page_content(page_id).map_err(|e| e.to_string())?;
        let content = Content::decode(&data).map_err(|e| e.to_string())?;

        let mut runs = Vec::new();
        let mut rects = Vec::new();
        let mut images = Vec::new();

        let mut x = 0.0;
        let mut y = 0.0;
        let mut leading = 0.0;
        let mut cm_y = 0.0;

        let mut push_run = |x: f64, y: f64, text: String| {
            if !text.trim().is_empty() {
                runs.push(TextRun {
                    x,
                    top: height - y,
                    text,
                });
            }
        };

        for op in &content.operations {
            match op.operator.as_str() {
                "BT" => {
                    x = 0.0;
                    y = 0.0;
                }
                "Tm" => {
                    if let (Some(e), Some(f)) = (num(op, 4), num(op, 5)) {
                        x = e;
                        y = f;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = (num(op, 0), num(op, 1)) {
                        x += tx;
                        y += ty;
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = (num(op, 0), num(op, 1)) {
                        x += tx;
                        y += ty;
                        leading = -ty;
                    }
                }
                "TL" => {
                    if let Some(l) = num(op, 0) {
                        leading = l;
                    }
                }
                "T*" => y -= leading,
                "Tj" => {
                    if let Some(text) = string_operand(op, 0) {
                        push_run(x, y, text);
                    }
                }
                "'" => {
                    y -= leading;
                    if let Some(text) = string_operand(op, 0) {
                        push_run(x, y, text);
                    }
                }
                "\"" => {
                    y -= leading;
                    if let Some(text) = string_operand(op, 2) {
                        push_run(x, y, text);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let mut text = String::new();
                        for item in items {
                            match item {
                                Object::String(bytes, _) => text.push_str(&decode_text(bytes)),
                                // A large negative kerning offset is a word gap.
                                Object::Integer(n) if *n < -150 => text.push(' '),
                                Object::Real(r) if *r < -150.0 => text.push(' '),
                                _ => {}
                            }
                        }
                        push_run(x, y, text);
                    }
                }
                "re" => {
                    if let (Some(rx), Some(ry), Some(w), Some(h)) =
                        (num(op, 0), num(op, 1), num(op, 2), num(op, 3))
                    {
                        rects.push(RectObj {
                            x0: rx,
                            top: height - (ry + h),
                            x1: rx + w,
                            bottom: height - ry,
                        });
                    }
                }
                "cm" => {
                    if let Some(f) = num(op, 5) {
                        cm_y = f;
                    }
                }
                "Do" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        images.push((
                            height - cm_y,
                            String::from_utf8_lossy(name).to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            runs,
            rects,
            images,
        })
    }

    fn has_text(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Assemble tables, text lines, leftover primitives and image markers
    /// into the page's positioned-object bag.
    fn into_positioned(self) -> Vec<PositionedObject> {
        let (tables, leftover_rects, used) = detect_tables(&self.rects, &self.runs);

        let mut free_runs: Vec<TextRun> = self
            .runs
            .into_iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(run, _)| run)
            .collect();
        free_runs.sort_by(|a, b| {
            (a.top, a.x)
                .partial_cmp(&(b.top, b.x))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut objects = tables;
        // Merge runs sharing a baseline into one text line.
        let mut i = 0;
        while i < free_runs.len() {
            let top = free_runs[i].top;
            let mut parts = vec![free_runs[i].text.clone()];
            let mut j = i + 1;
            while j < free_runs.len() && (free_runs[j].top - top).abs() <= BIN_TOLERANCE {
                parts.push(free_runs[j].text.clone());
                j += 1;
            }
            let text = parts.join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            objects.push(PositionedObject::TextLine { top, text });
            i = j;
        }

        for rect in leftover_rects {
            objects.push(PositionedObject::Primitive { top: rect.top });
        }
        for (top, name) in self.images {
            objects.push(PositionedObject::Image {
                top,
                name,
                description: None,
            });
        }
        objects
    }
}

/// Promote rectangle grids to tables. Returns the tables, the rects that
/// belong to no table, and a used-flag per text run.
fn detect_tables(
    rects: &[RectObj],
    runs: &[TextRun],
) -> (Vec<PositionedObject>, Vec<RectObj>, Vec<bool>) {
    let mut tables = Vec::new();
    let mut leftover = Vec::new();
    let mut used = vec![false; runs.len()];

    for cluster in cluster_rects(rects) {
        let members: Vec<RectObj> = cluster.iter().map(|&i| rects[i]).collect();

        let col_bins = bin_values(members.iter().map(|r| r.x0).collect());
        let row_bins = bin_values(members.iter().map(|r| r.top).collect());
        if members.len() < 4 || col_bins.len() < 2 || row_bins.len() < 2 {
            leftover.extend(members);
            continue;
        }

        let top = members.iter().map(|r| r.top).fold(f64::MAX, f64::min);
        let bottom = members.iter().map(|r| r.bottom).fold(f64::MIN, f64::max);
        let x0 = members.iter().map(|r| r.x0).fold(f64::MAX, f64::min);
        let x1 = members.iter().map(|r| r.x1).fold(f64::MIN, f64::max);

        let mut cells: Vec<Vec<Vec<String>>> =
            vec![vec![Vec::new(); col_bins.len()]; row_bins.len()];
        let mut any = false;
        for (i, run) in runs.iter().enumerate() {
            if used[i]
                || run.top < top - BIN_TOLERANCE
                || run.top > bottom + BIN_TOLERANCE
                || run.x < x0 - BIN_TOLERANCE
                || run.x > x1 + BIN_TOLERANCE
            {
                continue;
            }
            let row = bin_index(&row_bins, run.top);
            let col = bin_index(&col_bins, run.x);
            cells[row][col].push(run.text.trim().to_string());
            used[i] = true;
            any = true;
        }

        if !any {
            // Grid with no extractable cells; keep the slot in page order.
            warn!("Table grid at top={top:.1} yielded no cell text; emitting placeholder");
            tables.push(PositionedObject::Table { top, rows: None });
            continue;
        }

        let rows: Vec<Vec<String>> = cells
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.join(" ")).collect())
            .collect();
        tables.push(PositionedObject::Table {
            top,
            rows: Some(rows),
        });
    }

    (tables, leftover, used)
}

/// Group rects into connected components by proximity.
fn cluster_rects(rects: &[RectObj]) -> Vec<Vec<usize>> {
    let mut clusters = Vec::new();
    let mut assigned = vec![false; rects.len()];

    for i in 0..rects.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut cluster = Vec::new();
        let mut stack = vec![i];
        while let Some(j) = stack.pop() {
            cluster.push(j);
            for (k, candidate) in rects.iter().enumerate() {
                if !assigned[k] && touches(&rects[j], candidate) {
                    assigned[k] = true;
                    stack.push(k);
                }
            }
        }
        clusters.push(cluster);
    }
    clusters
}

fn touches(a: &RectObj, b: &RectObj) -> bool {
    a.x0 - GRID_TOLERANCE <= b.x1
        && b.x0 - GRID_TOLERANCE <= a.x1
        && a.top - GRID_TOLERANCE <= b.bottom
        && b.top - GRID_TOLERANCE <= a.bottom
}

/// Sorted representatives of value groups closer than the bin tolerance.
fn bin_values(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut bins: Vec<f64> = Vec::new();
    for v in values {
        match bins.last() {
            Some(last) if (v - last).abs() <= BIN_TOLERANCE => {}
            _ => bins.push(v),
        }
    }
    bins
}

fn bin_index(bins: &[f64], value: f64) -> usize {
    let mut idx = 0;
    for (i, b) in bins.iter().enumerate() {
        if value + BIN_TOLERANCE >= *b {
            idx = i;
        } else {
            break;
        }
    }
    idx
}

fn page_height(doc: &Document, page_id: (u32, u16)) -> f64 {
    if let Ok(dict) = doc.get_dictionary(page_id) {
        if let Ok(media_box) = dict.get(b"MediaBox").and_then(Object::as_array) {
            if media_box.len() == 4 {
                if let (Some(y0), Some(y1)) = (number(&media_box[1]), number(&media_box[3])) {
                    return y1 - y0;
                }
            }
        }
    }
    // US Letter unless the page says otherwise.
    792.0
}

fn num(op: &Operation, index: usize) -> Option<f64> {
    op.operands.get(index).and_then(number)
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn string_operand(op: &Operation, index: usize) -> Option<String> {
    match op.operands.get(index) {
        Some(Object::String(bytes, _)) => Some(decode_text(bytes)),
        _ => None,
    }
}

/// PDF string bytes are UTF-16BE when BOM-prefixed, otherwise treated as
/// Latin-1-compatible when not valid UTF-8.
fn decode_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Cleanup for the plain-extraction fallback: collapse blank runs, keep
/// page breaks visible.
fn clean_extracted(text: &str) -> String {
    text.replace('\x0C', "\n\n---\n\n")
        .lines()
        .map(str::trim_end)
        .fold(Vec::new(), |mut acc: Vec<String>, line| {
            let last_was_empty = acc.last().map(|l| l.is_empty()).unwrap_or(false);
            if !(line.is_empty() && last_was_empty) {
                acc.push(line.to_string());
            }
            acc
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use lopdf::Stream;
    use tempfile::tempdir;

    fn rect(x0: f64, top: f64, x1: f64, bottom: f64) -> RectObj {
        RectObj {
            x0,
            top,
            x1,
            bottom,
        }
    }

    fn run(x: f64, top: f64, text: &str) -> TextRun {
        TextRun {
            x,
            top,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_grid_of_rects_becomes_table() {
        // 2x2 grid of cell rects with one run per cell.
        let rects = vec![
            rect(100.0, 100.0, 200.0, 120.0),
            rect(200.0, 100.0, 300.0, 120.0),
            rect(100.0, 120.0, 200.0, 140.0),
            rect(200.0, 120.0, 300.0, 140.0),
        ];
        let runs = vec![
            run(105.0, 101.0, "Name"),
            run(205.0, 101.0, "Count"),
            run(105.0, 121.0, "widgets"),
            run(205.0, 121.0, "42"),
        ];

        let (tables, leftover, used) = detect_tables(&rects, &runs);
        assert_eq!(tables.len(), 1);
        assert!(leftover.is_empty());
        assert!(used.iter().all(|u| *u));

        match &tables[0] {
            PositionedObject::Table { top, rows: Some(rows) } => {
                assert!((top - 100.0).abs() < 0.01);
                assert_eq!(rows[0], vec!["Name", "Count"]);
                assert_eq!(rows[1], vec!["widgets", "42"]);
            }
            other => panic!("expected a table with rows, got {other:?}"),
        }
    }

    #[test]
    fn test_text_outside_grid_is_not_consumed() {
        let rects = vec![
            rect(100.0, 100.0, 200.0, 120.0),
            rect(200.0, 100.0, 300.0, 120.0),
            rect(100.0, 120.0, 200.0, 140.0),
            rect(200.0, 120.0, 300.0, 140.0),
        ];
        let runs = vec![run(105.0, 101.0, "inside"), run(105.0, 400.0, "far below")];

        let (_, _, used) = detect_tables(&rects, &runs);
        assert!(used[0]);
        assert!(!used[1]);
    }

    #[test]
    fn test_sparse_rects_are_primitives_not_tables() {
        let rects = vec![rect(10.0, 10.0, 500.0, 12.0)];
        let (tables, leftover, _) = detect_tables(&rects, &[]);
        assert!(tables.is_empty());
        assert_eq!(leftover.len(), 1);
    }

    #[test]
    fn test_grid_without_text_emits_placeholder() {
        let rects = vec![
            rect(100.0, 100.0, 200.0, 120.0),
            rect(200.0, 100.0, 300.0, 120.0),
            rect(100.0, 120.0, 200.0, 140.0),
            rect(200.0, 120.0, 300.0, 140.0),
        ];
        let (tables, _, _) = detect_tables(&rects, &[]);
        assert!(matches!(
            tables[0],
            PositionedObject::Table { rows: None, .. }
        ));
    }

    #[test]
    fn test_bin_values_merges_close_positions() {
        let bins = bin_values(vec![100.0, 100.5, 120.0, 119.5, 140.0]);
        assert_eq!(bins.len(), 3);
        assert_eq!(bin_index(&bins, 100.7), 0);
        assert_eq!(bin_index(&bins, 121.0), 1);
        assert_eq!(bin_index(&bins, 139.0), 2);
    }

    #[test]
    fn test_reads_generated_pdf_in_position_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.pdf");

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        // "Second" is emitted before "First" in the stream but positioned
        // lower on the page.
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new(
                    "Tm",
                    vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 600.into()],
                ),
                Operation::new("Tj", vec![Object::string_literal("Second line")]),
                Operation::new(
                    "Tm",
                    vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 700.into()],
                ),
                Operation::new("Tj", vec![Object::string_literal("First line")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(&path).unwrap();

        let text = PdfReader::new().read(&path).unwrap();

        assert!(text.contains("# Document: sample.pdf"));
        assert!(text.contains("## Page 1"));
        let first = text.find("First line").unwrap();
        let second = text.find("Second line").unwrap();
        assert!(first < second, "higher text must render before lower text");
    }
}
