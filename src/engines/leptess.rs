//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine, run with page segmentation mode 6 (one uniform
//! block of text), which suits the short numeric caption on each plate.
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::engine::{OcrEngine, OcrResult};
use crate::error::PlateError;
use image::DynamicImage;
use tesseract_static::tesseract::Tesseract;

/// Tesseract language used for plate captions
const LANGUAGE: &str = "eng";

/// Page segmentation mode: assume a single uniform block of text
const PAGE_SEG_MODE: &str = "6";

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine
    ///
    /// `tessdata_path` overrides the download cache when set.
    pub fn new(tessdata_path: Option<&str>) -> Result<Self, PlateError> {
        let tessdata_path = match tessdata_path {
            Some(path) => path.to_string(),
            None => ensure_tessdata_available(LANGUAGE)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(LANGUAGE)).map_err(|e| {
            PlateError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            LANGUAGE
        );

        Ok(Self { tessdata_path })
    }
}

impl OcrEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - single block page segmentation"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, PlateError> {
        let rgb_img = image.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        // Convert to BMP in memory (BMP is always supported by leptonica)
        let mut bmp_data = Vec::new();
        rgb_img
            .write_to(&mut std::io::Cursor::new(&mut bmp_data), image::ImageFormat::Bmp)
            .map_err(|e| PlateError::ProcessingError(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Processing crop: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(LANGUAGE)).map_err(|e| {
            PlateError::ProcessingError(format!("Failed to create Tesseract: {}", e))
        })?;

        tess = tess
            .set_variable("tessedit_pageseg_mode", PAGE_SEG_MODE)
            .map_err(|e| {
                PlateError::ProcessingError(format!("Failed to set page segmentation: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            PlateError::ProcessingError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess.recognize().map_err(|e| {
            PlateError::ProcessingError(format!("Failed to recognize text: {}", e))
        })?;

        let text = tess
            .get_text()
            .map_err(|e| PlateError::ProcessingError(format!("Failed to get text: {}", e)))?;

        // Get confidence score (0-100 scale, convert to 0.0-1.0)
        let confidence = tess.mean_text_conf() as f32 / 100.0;

        Ok(OcrResult { text, confidence })
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, PlateError> {
    let dir = cache_dir().join("tessdata");
    let traineddata_file = format!("{}.traineddata", language);
    ensure_downloaded(&tessdata_url(language), &dir, &traineddata_file)?;

    // Tesseract expects the directory, not the file
    dir.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| PlateError::InitializationError("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // Use tessdata_fast for smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}
