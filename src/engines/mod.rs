//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags.

pub mod download;

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::engine::OcrEngine;
use crate::error::PlateError;
use std::sync::Arc;

/// Names of the engines compiled into this binary, in preference order
pub fn available() -> Vec<&'static str> {
    let mut names = Vec::new();
    if cfg!(feature = "engine-ocrs") {
        names.push("ocrs");
    }
    if cfg!(feature = "engine-leptess") {
        names.push("leptess");
    }
    names
}

/// Name of the engine used when none is requested
pub fn default_name() -> Option<&'static str> {
    available().first().copied()
}

/// Creates OCR engines by name
///
/// Engines are only initialized on request, since each one may download
/// model data on first use.
pub struct EngineRegistry {
    #[cfg_attr(not(feature = "engine-leptess"), allow(dead_code))]
    tessdata_path: Option<String>,
}

impl EngineRegistry {
    pub fn new(tessdata_path: Option<String>) -> Self {
        Self { tessdata_path }
    }

    /// Initialize the engine called `name`
    pub fn create(&self, name: &str) -> Result<Arc<dyn OcrEngine>, PlateError> {
        if !available().contains(&name) {
            return Err(PlateError::UnknownEngine(format!(
                "'{}' (available: {})",
                name,
                available().join(", ")
            )));
        }

        tracing::info!("Initializing {} engine...", name);

        let engine: Arc<dyn OcrEngine> = match name {
            #[cfg(feature = "engine-ocrs")]
            "ocrs" => Arc::new(ocrs::OcrsEngine::new()?),
            #[cfg(feature = "engine-leptess")]
            "leptess" => Arc::new(leptess::LeptessEngine::new(self.tessdata_path.as_deref())?),
            _ => return Err(PlateError::UnknownEngine(name.to_string())),
        };

        tracing::info!("Using {} ({})", engine.name(), engine.description());
        Ok(engine)
    }
}
