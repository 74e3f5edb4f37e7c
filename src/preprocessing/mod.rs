//! Crop preprocessing ahead of OCR
//!
//! Turns a colour crop into the high-contrast binary image the OCR engines
//! read best.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, Preset};
