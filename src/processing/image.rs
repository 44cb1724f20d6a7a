use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageOutputFormat};
use imageproc::filter::median_filter;

use crate::models::OcrConfig;
use crate::utils::{DocumentError, Result};

/// Prepares document photos for OCR.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode, bound the size, convert to grayscale, denoise and boost
    /// contrast. Returns a PNG.
    pub fn preprocess(image_bytes: &[u8], config: &OcrConfig) -> Result<Vec<u8>> {
        let img = image::load_from_memory(image_bytes)
            .map_err(|e| DocumentError::ImageProcessing(format!("Failed to load image: {}", e)))?;

        let img = Self::limit_size(img, config.max_image_size);
        let gray = img.to_luma8();
        let gray = if config.denoise {
            median_filter(&gray, 1, 1)
        } else {
            gray
        };
        let enhanced: GrayImage = image::imageops::contrast(&gray, config.contrast);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(enhanced)
            .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
            .map_err(|e| DocumentError::ImageProcessing(format!("Failed to encode image: {}", e)))?;
        Ok(png)
    }

    // Keeps aspect ratio; never upscales.
    fn limit_size(img: DynamicImage, max_size: u32) -> DynamicImage {
        if img.width() <= max_size && img.height() <= max_size {
            return img;
        }
        img.resize(max_size, max_size, FilterType::Lanczos3)
    }
}
