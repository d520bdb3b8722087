//! Image reader: OCR plus optional description.

use super::Reader;
use crate::describe::Describe;
use crate::error::{ExtractError, ExtractResult};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extracts text from images with Tesseract, appending a description from
/// the injected capability when one is available.
pub struct ImageReader {
    describer: Arc<dyn Describe>,
}

impl ImageReader {
    pub fn new(describer: Arc<dyn Describe>) -> Self {
        Self { describer }
    }

    fn ocr(&self, path: &Path) -> ExtractResult<String> {
        let tesseract = which::which("tesseract").map_err(|_| ExtractError::ReaderFailed {
            path: path.to_path_buf(),
            message: "tesseract not found on PATH".to_string(),
        })?;

        debug!("Running OCR on {:?}", path);
        let output = Command::new(tesseract)
            .arg(path)
            .arg("stdout")
            .args(["--oem", "3"])
            .args(["--psm", "1"])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Tesseract writes warnings to stderr but may still have worked.
            if output.stdout.is_empty() {
                return Err(ExtractError::ReaderFailed {
                    path: path.to_path_buf(),
                    message: stderr.trim().to_string(),
                });
            }
            debug!("Tesseract warning: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Reader for ImageReader {
    fn read(&self, path: &Path) -> ExtractResult<String> {
        let mut out = self.ocr(path)?;

        match self.describer.describe(path) {
            Ok(Some(description)) => {
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(&description);
            }
            Ok(None) => {}
            // A missing description never fails the document.
            Err(e) => warn!("Image description failed for {:?}: {}", path, e),
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::NoopDescriber;

    #[test]
    fn test_missing_file_without_tesseract_is_reader_failure() {
        let reader = ImageReader::new(Arc::new(NoopDescriber));
        let result = reader.read(Path::new("/nonexistent/image.png"));
        assert!(result.is_err());
    }
}
