use crate::error::PlateError;
use image::DynamicImage;

/// OCR recognition result
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    pub text: String,
    pub confidence: f32,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text in an in-memory image
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, PlateError>;
}
