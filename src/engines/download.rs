//! Cached downloads of OCR model files

use crate::error::PlateError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-user cache directory for downloaded model data
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("plate-digits")
}

/// Ensure `filename` exists in `dir`, downloading it from `url` if missing.
pub fn ensure_downloaded(url: &str, dir: &Path, filename: &str) -> Result<PathBuf, PlateError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        PlateError::InitializationError(format!("Failed to create cache directory: {}", e))
    })?;

    let path = dir.join(filename);

    if !path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &path)?;
        tracing::info!("Downloaded {} to {:?}", filename, path);
    } else {
        tracing::info!("Using cached {} from {:?}", filename, path);
    }

    Ok(path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), PlateError> {
    let response = ureq::get(url).call().map_err(|e| {
        PlateError::InitializationError(format!("Failed to download {}: {}", url, e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        PlateError::InitializationError(format!("Failed to read response body: {}", e))
    })?;

    // Only complete downloads may appear at `path`
    let partial = path.with_extension("part");
    let mut file = File::create(&partial).map_err(|e| {
        PlateError::InitializationError(format!("Failed to create {:?}: {}", partial, e))
    })?;
    file.write_all(&buffer).map_err(|e| {
        PlateError::InitializationError(format!("Failed to write {:?}: {}", partial, e))
    })?;

    std::fs::rename(&partial, path).map_err(|e| {
        PlateError::InitializationError(format!("Failed to move {:?} into place: {}", partial, e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_file_is_not_downloaded_again() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.rten"), b"cached").unwrap();

        // An unreachable URL proves no request is made for cached files
        let path = ensure_downloaded("http://127.0.0.1:9/model.rten", dir.path(), "model.rten")
            .unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"cached");
    }

    #[test]
    fn test_cache_dir_is_namespaced() {
        assert!(cache_dir().ends_with("plate-digits"));
    }
}
