//! Encoding of image files as Base64 text.

use super::Converter;
use crate::error::{ConvertError, ConvertResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sift_core::ext_key;
use std::path::Path;

/// Encodes image bytes to a Base64 text file for downstream capabilities
/// that consume inline image payloads.
pub struct Base64Converter;

impl Base64Converter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Base64Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for Base64Converter {
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let ext = ext_key(input);
        if !self.supports(&ext) {
            return Err(ConvertError::Unsupported {
                strategy: "base64",
                extension: ext,
            });
        }

        let bytes = std::fs::read(input)?;
        if bytes.is_empty() {
            return Err(ConvertError::EmptyInput(input.to_path_buf()));
        }
        std::fs::write(output, STANDARD.encode(bytes))?;
        Ok(())
    }

    fn target_extension(&self) -> &'static str {
        "b64"
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp", "svg"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_encodes_bytes() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pixel.png");
        let output = dir.path().join("pixel.b64");
        std::fs::write(&input, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        Base64Converter::new().convert(&input, &output).unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "iVBORw==");
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("blank.png");
        let output = dir.path().join("blank.b64");
        std::fs::write(&input, b"").unwrap();

        let err = Base64Converter::new().convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput(_)));
    }
}
