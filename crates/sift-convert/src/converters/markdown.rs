//! Conversion of text-adjacent formats to Markdown.

use super::Converter;
use crate::error::{ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, Reader};
use scraper::{Html, Selector};
use sift_core::ext_key;
use std::path::Path;

/// Converts plain text, HTML, CSV and Excel sources to Markdown.
///
/// Plain text and XML pass through verbatim (empty input rejected); HTML is
/// reduced to headings, paragraphs, list items and tables; tabular sources
/// become pipe tables.
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_text(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let text = std::fs::read_to_string(input)?;
        if text.trim().is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }
        std::fs::write(output, text)?;
        Ok(())
    }

    fn convert_html(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let html = std::fs::read_to_string(input)?;
        let document = Html::parse_document(&html);
        let mut out = String::new();

        if let Some(title) = select_first_text(&document, "title")? {
            out.push_str(&format!("# {title}\n\n"));
        }

        let block = selector("h1, h2, h3, h4, h5, h6, p, li")?;
        for element in document.select(&block) {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                continue;
            }
            match element.value().name() {
                "h1" => out.push_str(&format!("# {text}\n\n")),
                "h2" => out.push_str(&format!("## {text}\n\n")),
                "h3" | "h4" | "h5" | "h6" => out.push_str(&format!("### {text}\n\n")),
                "li" => out.push_str(&format!("- {text}\n")),
                _ => out.push_str(&format!("{text}\n\n")),
            }
        }

        let table = selector("table")?;
        let row_sel = selector("tr")?;
        let cell_sel = selector("th, td")?;
        for table_el in document.select(&table) {
            let mut rows: Vec<Vec<String>> = Vec::new();
            for row in table_el.select(&row_sel) {
                let cells: Vec<String> = row
                    .select(&cell_sel)
                    .map(|c| c.text().collect::<Vec<_>>().join(" ").trim().to_string())
                    .collect();
                if !cells.is_empty() {
                    rows.push(cells);
                }
            }
            if !rows.is_empty() {
                out.push_str(&pipe_table(&rows));
                out.push('\n');
            }
        }

        if out.trim().is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }
        std::fs::write(output, out)?;
        Ok(())
    }

    fn convert_csv(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(input)
            .map_err(|e| ConvertError::ParseFailed {
                format: "csv",
                message: e.to_string(),
            })?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ConvertError::ParseFailed {
                format: "csv",
                message: e.to_string(),
            })?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        if rows.is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }

        std::fs::write(output, pipe_table(&rows))?;
        Ok(())
    }

    fn convert_excel(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let mut workbook = open_workbook_auto(input).map_err(|e| ConvertError::ParseFailed {
            format: "excel",
            message: e.to_string(),
        })?;

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

        if out.is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }
        std::fs::write(output, out)?;
        Ok(())
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MarkdownConverter {
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        match ext_key(input).as_str() {
            "txt" | "md" | "markdown" | "xml" => self.convert_text(input, output),
            "html" | "htm" => self.convert_html(input, output),
            "csv" => self.convert_csv(input, output),
            "xlsx" | "xls" => self.convert_excel(input, output),
            other => Err(ConvertError::Unsupported {
                strategy: "markdown",
                extension: other.to_string(),
            }),
        }
    }

    fn target_extension(&self) -> &'static str {
        "md"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "md", "markdown", "xml", "html", "htm", "csv", "xlsx", "xls"]
    }
}

fn selector(css: &str) -> ConvertResult<Selector> {
    Selector::parse(css).map_err(|e| ConvertError::ParseFailed {
        format: "html",
        message: e.to_string(),
    })
}

fn select_first_text(document: &Html, css: &str) -> ConvertResult<Option<String>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next().map(|el| {
        el.text()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }))
}

/// Render rows as a Markdown pipe table: header, separator, data.
pub(crate) fn pipe_table(rows: &[Vec<String>]) -> String {
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
