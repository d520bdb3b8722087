//! Optional image description capability.
//!
//! Readers that encounter images can ask an injected [`Describe`]
//! implementation for a textual description. The default implementation is
//! a no-op; an Ollama-backed one can be enabled through configuration.

use crate::error::{ExtractError, ExtractResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use sift_config::DescribeConfig;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// A capability that can describe an image file.
pub trait Describe: Send + Sync {
    /// Produce a description for the image, or `None` when the capability
    /// has nothing to say.
    fn describe(&self, image: &Path) -> ExtractResult<Option<String>>;
}

/// The absent capability.
pub struct NoopDescriber;

impl Describe for NoopDescriber {
    fn describe(&self, _image: &Path) -> ExtractResult<Option<String>> {
        Ok(None)
    }
}

/// Describes images with a vision model served by Ollama.
pub struct OllamaDescriber {
    host: String,
    model: String,
    client: reqwest::Client,
    rt: Runtime,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaDescriber {
    pub fn new(config: &DescribeConfig) -> ExtractResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ExtractError::DescribeUnavailable(e.to_string()))?;
        let rt = Runtime::new().map_err(|e| ExtractError::DescribeUnavailable(e.to_string()))?;

        Ok(Self {
            host: config.host.clone(),
            model: config.model.clone(),
            client,
            rt,
        })
    }
}

impl Describe for OllamaDescriber {
    fn describe(&self, image: &Path) -> ExtractResult<Option<String>> {
        let bytes = std::fs::read(image)?;
        let encoded = STANDARD.encode(bytes);

        let url = format!("{}/api/generate", self.host);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": "Describe this image in two or three factual sentences.",
            "images": [encoded],
            "stream": false,
        });

        debug!("Requesting image description from {}", self.host);
        let response: GenerateResponse = self
            .rt
            .block_on(async {
                self.client
                    .post(&url)
                    .json(&body)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await
            })
            .map_err(|e: reqwest::Error| ExtractError::DescribeUnavailable(e.to_string()))?;

        let description = response.response.trim().to_string();
        Ok((!description.is_empty()).then_some(description))
    }
}

/// Build the describer the configuration asks for.
pub fn describer_from_config(config: &DescribeConfig) -> ExtractResult<Arc<dyn Describe>> {
    if !config.enabled {
        return Ok(Arc::new(NoopDescriber));
    }
    Ok(Arc::new(OllamaDescriber::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_describer_says_nothing() {
        let describer = NoopDescriber;
        let result = describer.describe(Path::new("whatever.png")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_disabled_config_builds_noop() {
        let config = DescribeConfig::default();
        assert!(!config.enabled);
        let describer = describer_from_config(&config).unwrap();
        assert!(describer.describe(Path::new("x.png")).unwrap().is_none());
    }
}
