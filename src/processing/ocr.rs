use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tesseract::Tesseract;

use crate::models::{DocumentType, OcrConfig};
use crate::utils::{DocumentError, Result};

/// Turns a document image into raw text.
pub trait OcrEngine {
    fn recognize(&self, image: &[u8], document_type: DocumentType) -> Result<String>;
}

/// Tesseract-backed OCR. PAN cards are read with Hindi alongside English.
pub struct TesseractOcr {
    tessdata_dir: Option<PathBuf>,
}

impl TesseractOcr {
    pub fn new(config: &OcrConfig) -> Self {
        TesseractOcr {
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8], document_type: DocumentType) -> Result<String> {
        let mut temp_file = NamedTempFile::new()
            .map_err(|e| DocumentError::Ocr(format!("Failed to create temp file: {}", e)))?;
        temp_file
            .write_all(image)
            .map_err(|e| DocumentError::Ocr(format!("Failed to write to temp file: {}", e)))?;

        let image_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| DocumentError::Ocr("Failed to convert path to string".to_string()))?;
        let datapath = match &self.tessdata_dir {
            Some(dir) => Some(
                dir.to_str()
                    .ok_or_else(|| DocumentError::Ocr("Invalid tessdata path".to_string()))?,
            ),
            None => None,
        };

        let mut tess = Tesseract::new(datapath, Some(document_type.ocr_language()))
            .map_err(|e| DocumentError::Ocr(format!("Tesseract init error: {}", e)))?;
        tess.set_page_seg_mode(tesseract::PageSegMode::PsmAuto);

        let text = tess
            .set_image(image_path)
            .map_err(|e| DocumentError::Ocr(format!("Tesseract set image error: {}", e)))?
            .get_text()
            .map_err(|e| DocumentError::Ocr(format!("Tesseract error: {}", e)))?;

        log::debug!("OCR produced {} bytes of text", text.len());
        Ok(text)
    }
}
