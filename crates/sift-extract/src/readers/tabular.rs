//! Reader for delimited and spreadsheet sources.

use super::Reader;
use crate::error::{ExtractError, ExtractResult};
use calamine::{open_workbook_auto, Data, Reader as _};
use sift_core::ext_key;
use std::path::Path;

/// Renders CSV and Excel sources as Markdown pipe tables.
pub struct TabularReader;

impl TabularReader {
    pub fn new() -> Self {
        Self
    }

    fn read_csv(&self, path: &Path) -> ExtractResult<String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| reader_failed(path, &e.to_string()))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| reader_failed(path, &e.to_string()))?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(pipe_table(&rows))
    }

    fn read_excel(&self, path: &Path) -> ExtractResult<String> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| reader_failed(path, &e.to_string()))?;

        let mut out = String::new();
        for (name, range) in workbook.worksheets() {
            let rows: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect();
            if rows.is_empty() {
                continue;
            }
            out.push_str(&format!("## Sheet: {name}\n\n"));
            out.push_str(&pipe_table(&rows));
            out.push('\n');
        }
        Ok(out)
    }
}

impl Default for TabularReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for TabularReader {
    fn read(&self, path: &Path) -> ExtractResult<String> {
        match ext_key(path).as_str() {
            "xlsx" | "xls" => self.read_excel(path),
            // CSV also covers unknown delimited text handed to this reader.
            _ => self.read_csv(path),
        }
    }
}

fn reader_failed(path: &Path, message: &str) -> ExtractError {
    ExtractError::ReaderFailed {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn pipe_table(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = row.clone();
        cells.resize(width, String::new());
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
        if i == 0 {
            out.push_str(&format!("| {} |\n", vec!["---"; width].join(" | ")));
        }
    }
    out
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
