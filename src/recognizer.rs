//! Reading the numeric code printed on a crop

use crate::engine::OcrEngine;
use crate::error::PlateError;
use crate::preprocessing::Pipeline;
use crate::splitter::Crop;
use image::DynamicImage;
use std::sync::Arc;

/// Digits read from one crop
#[derive(Debug, Clone, PartialEq)]
pub struct CellDigits {
    /// 1-based grid row
    pub row: u32,
    /// 1-based grid column
    pub col: u32,
    pub digits: Vec<u8>,
    /// Raw OCR text the digits were taken from
    pub text: String,
}

/// Keep the decimal digits of `text`, left to right.
///
/// Everything else is dropped. Returns an empty vector when no digit is present.
pub fn extract_digits(text: &str) -> Vec<u8> {
    text.chars()
        .filter(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

/// Preprocesses crops and runs them through an OCR engine
pub struct DigitReader {
    pipeline: Pipeline,
    engine: Arc<dyn OcrEngine>,
}

impl DigitReader {
    pub fn new(pipeline: Pipeline, engine: Arc<dyn OcrEngine>) -> Self {
        Self { pipeline, engine }
    }

    /// Read the digit vector of a single crop
    pub fn read(&self, crop: &Crop) -> Result<CellDigits, PlateError> {
        let prepared = self
            .pipeline
            .process(DynamicImage::ImageRgb8(crop.image.clone()))?;

        tracing::debug!(
            "Preprocessed {} with preset '{}' in {}ms ({} steps)",
            crop.label(),
            prepared.preset,
            prepared.total_time_ms,
            prepared.steps.len()
        );

        let result = self.engine.recognize(&prepared.image)?;
        let digits = extract_digits(&result.text);

        if digits.is_empty() {
            tracing::warn!("No digits recognized in {}", crop.label());
        } else {
            tracing::info!(
                "{}: {} digit(s) via {} (confidence {:.2})",
                crop.label(),
                digits.len(),
                self.engine.name(),
                result.confidence
            );
        }

        Ok(CellDigits {
            row: crop.row + 1,
            col: crop.col + 1,
            digits,
            text: result.text,
        })
    }

    /// Read several crops in the given order
    pub fn read_all<'a>(
        &self,
        crops: impl IntoIterator<Item = &'a Crop>,
    ) -> Result<Vec<CellDigits>, PlateError> {
        crops.into_iter().map(|crop| self.read(crop)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OcrResult;
    use crate::preprocessing::Preset;
    use crate::splitter::CellBounds;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Returns canned text and records the images it was shown
    struct FakeEngine {
        text: String,
        seen: Mutex<Vec<DynamicImage>>,
    }

    impl FakeEngine {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl OcrEngine for FakeEngine {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn description(&self) -> &'static str {
            "canned text"
        }

        fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, PlateError> {
            self.seen.lock().unwrap().push(image.clone());
            Ok(OcrResult {
                text: self.text.clone(),
                confidence: 0.9,
            })
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<OcrResult, PlateError> {
            Err(PlateError::ProcessingError("engine offline".to_string()))
        }
    }

    fn crop(row: u32, col: u32) -> Crop {
        Crop {
            row,
            col,
            bounds: CellBounds {
                top: 0,
                left: 0,
                bottom: 8,
                right: 8,
            },
            image: RgbImage::from_fn(8, 8, |x, _| {
                if x < 4 {
                    Rgb([10, 10, 10])
                } else {
                    Rgb([250, 250, 250])
                }
            }),
            path: PathBuf::from(format!("cell_{}_{}.png", row + 1, col + 1)),
        }
    }

    #[test]
    fn test_extract_digits_filters_in_order() {
        assert_eq!(extract_digits("A1b2C3"), vec![1, 2, 3]);
    }

    #[test]
    fn test_extract_digits_no_digits_is_empty() {
        assert!(extract_digits("abc").is_empty());
        assert!(extract_digits("").is_empty());
    }

    #[test]
    fn test_extract_digits_ignores_whitespace() {
        assert_eq!(extract_digits("  7  "), vec![7]);
        assert_eq!(extract_digits("0 0\n9-1"), vec![0, 0, 9, 1]);
    }

    #[test]
    fn test_extract_digits_skips_non_ascii_numerals() {
        assert_eq!(extract_digits("²4٣"), vec![4]);
    }

    #[test]
    fn test_read_binarizes_before_ocr() {
        let engine = Arc::new(FakeEngine::new("No. 42\n"));
        let reader = DigitReader::new(Pipeline::new(Preset::Otsu), engine.clone());

        let digits = reader.read(&crop(0, 0)).unwrap();

        assert_eq!(digits.digits, vec![4, 2]);
        assert_eq!((digits.row, digits.col), (1, 1));
        assert_eq!(digits.text, "No. 42\n");

        let seen = engine.seen.lock().unwrap();
        let gray = seen[0].as_luma8().expect("engine should receive a binary image");
        assert_eq!(gray.get_pixel(1, 1).0[0], 255);
        assert_eq!(gray.get_pixel(6, 1).0[0], 0);
    }

    #[test]
    fn test_read_without_digits_is_not_an_error() {
        let reader = DigitReader::new(Pipeline::default(), Arc::new(FakeEngine::new("~~")));
        let digits = reader.read(&crop(2, 3)).unwrap();
        assert!(digits.digits.is_empty());
        assert_eq!((digits.row, digits.col), (3, 4));
    }

    #[test]
    fn test_read_all_keeps_crop_order() {
        let reader = DigitReader::new(Pipeline::new(Preset::None), Arc::new(FakeEngine::new("5")));
        let crops = vec![crop(0, 0), crop(0, 1), crop(1, 0)];

        let cells = reader.read_all(&crops).unwrap();

        let positions: Vec<(u32, u32)> = cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_engine_failure_propagates() {
        let reader = DigitReader::new(Pipeline::default(), Arc::new(FailingEngine));
        let err = reader.read(&crop(0, 0)).unwrap_err();
        assert!(matches!(err, PlateError::ProcessingError(_)));
    }
}
