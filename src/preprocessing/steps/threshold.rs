use crate::error::PlateError;
use image::DynamicImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Apply inverted Otsu binarization
///
/// The global level is picked by Otsu's method. Pixels brighter than the
/// level become 0 and the rest 255, so dark ink ends up as white foreground.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, PlateError> {
    let gray = image.into_luma8();
    let level = otsu_level(&gray);
    tracing::trace!("Otsu level: {}", level);

    let binarized = threshold(&gray, level, ThresholdType::BinaryInverted);
    Ok(DynamicImage::ImageLuma8(binarized))
}
