//! Conversion of office and markup documents to PDF via external engines.

use super::Converter;
use crate::chain::{run_chain, Technique};
use crate::error::{ConvertError, ConvertResult};
use crate::tool::{require_tool, run_tool};
use sift_core::ext_key;
use std::path::Path;
use std::process::Command;

/// Converts office documents, HTML and XML to PDF.
///
/// Office formats go straight to LibreOffice headless. HTML tries, in this
/// fixed order: wkhtmltopdf (fast native renderer), pandoc (PDF engine
/// intermediate), LibreOffice (full document engine, last resort). XML tries
/// pandoc then LibreOffice. Each failed technique is recorded on the final
/// error when the chain is exhausted.
pub struct PdfConverter;

impl PdfConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_office(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        convert_with_libreoffice(input, output)
    }

    fn convert_html(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        run_chain(
            vec![
                Technique::new("wkhtmltopdf", || {
                    let tool = require_tool("wkhtmltopdf")?;
                    run_tool(
                        Command::new(tool)
                            .arg("--quiet")
                            .arg(input)
                            .arg(output),
                        "wkhtmltopdf",
                    )
                }),
                Technique::new("pandoc", || pandoc_to_pdf(input, output)),
                Technique::new("libreoffice", || convert_with_libreoffice(input, output)),
            ],
            output,
        )
    }

    fn convert_xml(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        run_chain(
            vec![
                Technique::new("pandoc", || pandoc_to_pdf(input, output)),
                Technique::new("libreoffice", || convert_with_libreoffice(input, output)),
            ],
            output,
        )
    }
}

impl Default for PdfConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PdfConverter {
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        match ext_key(input).as_str() {
            "doc" | "docx" | "odt" | "ppt" | "pptx" => self.convert_office(input, output),
            "html" | "htm" => self.convert_html(input, output),
            "xml" => self.convert_xml(input, output),
            other => Err(ConvertError::Unsupported {
                strategy: "pdf",
                extension: other.to_string(),
            }),
        }
    }

    fn target_extension(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &["doc", "docx", "odt", "ppt", "pptx", "html", "htm", "xml"]
    }
}

fn pandoc_to_pdf(input: &Path, output: &Path) -> ConvertResult<()> {
    let tool = require_tool("pandoc")?;
    run_tool(
        Command::new(tool).arg(input).arg("-o").arg(output),
        "pandoc",
    )
}

/// LibreOffice writes `<stem>.pdf` into the output directory; rename it onto
/// the requested path when they differ.
fn convert_with_libreoffice(input: &Path, output: &Path) -> ConvertResult<()> {
    let tool = require_tool("soffice")?;
    let out_dir = output.parent().unwrap_or_else(|| Path::new("."));

    run_tool(
        Command::new(tool)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg(input)
            .arg("--outdir")
            .arg(out_dir),
        "soffice",
    )?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let generated = out_dir.join(format!("{stem}.pdf"));
    if !generated.exists() {
        return Err(ConvertError::ToolFailed {
            tool: "soffice".to_string(),
            message: format!("did not produce {}", generated.display()),
        });
    }
    if generated != output {
        std::fs::rename(&generated, output)?;
    }
    Ok(())
}
