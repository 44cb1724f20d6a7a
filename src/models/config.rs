//! Configuration for the extraction engine and its OCR front end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::{DocumentError, Result};

/// Main configuration for the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Characters inspected on each side of a date when classifying it.
    pub context_window: usize,

    /// Largest OCR text accepted, in bytes.
    pub max_input_bytes: usize,

    /// Image preprocessing and OCR settings.
    pub ocr: OcrConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            context_window: 20,
            max_input_bytes: 1024 * 1024,
            ocr: OcrConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON configuration file. Keys left out take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: ExtractorConfig = serde_json::from_str(raw)
            .map_err(|e| DocumentError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(DocumentError::Config(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.ocr.max_image_size == 0 {
            return Err(DocumentError::Config(
                "ocr.max_image_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// OCR front-end configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract data directory. Falls back to `TESSDATA_PREFIX` when unset.
    pub tessdata_dir: Option<PathBuf>,

    /// Maximum image dimension (longer side) before OCR.
    pub max_image_size: u32,

    /// Contrast adjustment passed to the image filter, in percent.
    pub contrast: f32,

    /// Run a 3x3 median filter before OCR.
    pub denoise: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tessdata_dir: None,
            max_image_size: 2000,
            contrast: 22.5, // roughly a 1.5x stretch around mid-gray
            denoise: true,
        }
    }
}
