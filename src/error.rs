use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Failed to load image {path:?}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("Failed to create output directory {path:?}: {reason}")]
    OutputDir { path: PathBuf, reason: String },

    #[error("Failed to save crop {path:?}: {reason}")]
    ImageSave { path: PathBuf, reason: String },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Image too small: {width}x{height} cannot be split into {rows} rows and {cols} columns")]
    ImageTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },

    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("Unknown OCR engine: {0}")]
    UnknownEngine(String),
}
