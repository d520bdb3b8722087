//! Conversion of images to PNG via external tools.

use super::Converter;
use crate::chain::{run_chain, Technique};
use crate::error::{ConvertError, ConvertResult};
use crate::tool::{require_tool, run_tool};
use sift_core::ext_key;
use std::path::Path;
use std::process::Command;

/// Converts raster images to PNG with ffmpeg; SVG goes through rsvg-convert
/// with ffmpeg as a second attempt.
pub struct PngConverter;

impl PngConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_raster(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let tool = require_tool("ffmpeg")?;
        run_tool(
            Command::new(tool)
                .arg("-y")
                .arg("-i")
                .arg(input)
                .arg(output),
            "ffmpeg",
        )
    }

    fn convert_svg(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        run_chain(
            vec![
                Technique::new("rsvg-convert", || {
                    let tool = require_tool("rsvg-convert")?;
                    run_tool(
                        Command::new(tool)
                            .arg("-f")
                            .arg("png")
                            .arg("-o")
                            .arg(output)
                            .arg(input),
                        "rsvg-convert",
                    )
                }),
                Technique::new("ffmpeg", || self.convert_raster(input, output)),
            ],
            output,
        )
    }
}

impl Default for PngConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for PngConverter {
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        match ext_key(input).as_str() {
            "jpg" | "jpeg" | "png" | "bmp" | "gif" | "tiff" | "webp" => {
                self.convert_raster(input, output)
            }
            "svg" => self.convert_svg(input, output),
            other => Err(ConvertError::Unsupported {
                strategy: "png",
                extension: other.to_string(),
            }),
        }
    }

    fn target_extension(&self) -> &'static str {
        "png"
    }

    fn extensions(&self) -> &[&str] {
        &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp", "svg"]
    }
}
