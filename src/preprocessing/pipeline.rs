use crate::error::PlateError;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Preprocessing preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Hand the crop to OCR untouched
    None,
    /// Luminance conversion only
    Grayscale,
    /// Luminance conversion followed by inverted Otsu binarization
    #[default]
    Otsu,
}

impl Preset {
    /// Get the preset name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Otsu => "otsu",
        }
    }
}

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingResult {
    /// Preprocessed image (not serialized)
    #[serde(skip)]
    pub image: DynamicImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Preset used
    pub preset: String,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Preprocessing pipeline that applies steps based on preset
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    preset: Preset,
}

impl Pipeline {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    /// Process an image according to the configured preset
    pub fn process(&self, image: DynamicImage) -> Result<PreprocessingResult, PlateError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();
        let mut img = image;

        if self.preset != Preset::None {
            img = self.run_step("grayscale", img, &mut steps_timing, steps::grayscale::apply)?;
        }

        if self.preset == Preset::Otsu {
            img = self.run_step("threshold", img, &mut steps_timing, steps::threshold::apply)?;
        }

        Ok(PreprocessingResult {
            image: img,
            total_time_ms: start.elapsed().as_millis() as u64,
            preset: self.preset.as_str().to_string(),
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: DynamicImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<DynamicImage, PlateError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, PlateError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Rgb([30, 30, 30])
            } else {
                Rgb([220, 220, 220])
            }
        }))
    }

    #[test]
    fn test_none_preset_is_passthrough() {
        let result = Pipeline::new(Preset::None).process(sample()).unwrap();
        assert!(result.steps.is_empty());
        assert!(result.image.as_rgb8().is_some());
        assert_eq!(result.preset, "none");
    }

    #[test]
    fn test_grayscale_preset_runs_one_step() {
        let result = Pipeline::new(Preset::Grayscale).process(sample()).unwrap();
        let names: Vec<&str> = result.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["grayscale"]);
        assert!(result.image.as_luma8().is_some());
    }

    #[test]
    fn test_default_preset_binarizes_inverted() {
        let result = Pipeline::default().process(sample()).unwrap();
        assert_eq!(result.preset, "otsu");
        let names: Vec<&str> = result.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["grayscale", "threshold"]);

        let gray = result.image.to_luma8();
        assert_eq!(gray.get_pixel(2, 5).0[0], 255);
        assert_eq!(gray.get_pixel(15, 5).0[0], 0);
    }
}
