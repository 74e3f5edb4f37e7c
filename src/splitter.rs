//! Grid splitting of a scanned sheet
//!
//! The sheet is divided into `rows x cols` equal cells. Each cell is grown by a
//! quarter of its size on every side so that plates sitting near a cell border
//! still land whole inside one crop. Neighbouring crops therefore overlap.

use crate::config::GridConfig;
use crate::error::PlateError;
use image::{DynamicImage, RgbImage};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Padded pixel bounds of one cell, half-open on bottom/right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellBounds {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl CellBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// One extracted sub-image, owning its pixels
#[derive(Debug, Clone)]
pub struct Crop {
    /// 0-based grid row
    pub row: u32,
    /// 0-based grid column
    pub col: u32,
    pub bounds: CellBounds,
    pub image: RgbImage,
    pub path: PathBuf,
}

impl Crop {
    /// 1-based (row, col) label used in file names and reports
    pub fn label(&self) -> String {
        format!("cell_{}_{}", self.row + 1, self.col + 1)
    }
}

/// Result of splitting a sheet
#[derive(Debug)]
pub struct SplitOutcome {
    pub crops: Vec<Crop>,
    pub output_dir: PathBuf,
}

/// Load the source sheet
pub fn load_image(path: &Path) -> Result<DynamicImage, PlateError> {
    image::open(path).map_err(|e| PlateError::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// File name for the crop at 0-based (row, col)
pub fn crop_file_name(row: u32, col: u32) -> String {
    format!("cell_{}_{}.png", row + 1, col + 1)
}

/// Compute padded bounds for the cell at 0-based (row, col).
///
/// Callers must ensure `grid.rows` and `grid.cols` are non-zero.
pub fn cell_bounds(width: u32, height: u32, grid: &GridConfig, row: u32, col: u32) -> CellBounds {
    let cell_height = height / grid.rows;
    let cell_width = width / grid.cols;
    let pad_y = cell_height / 4;
    let pad_x = cell_width / 4;

    CellBounds {
        top: (row * cell_height).saturating_sub(pad_y),
        left: (col * cell_width).saturating_sub(pad_x),
        bottom: ((row + 1) * cell_height + pad_y).min(height),
        right: ((col + 1) * cell_width + pad_x).min(width),
    }
}

/// Split `image` according to `grid`, writing every crop as PNG.
///
/// Crops are returned in row-major order. Existing files with the same names
/// are overwritten.
pub fn split_image(image: &DynamicImage, grid: &GridConfig) -> Result<SplitOutcome, PlateError> {
    grid.validate()?;

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    if height < grid.rows || width < grid.cols {
        return Err(PlateError::ImageTooSmall {
            width,
            height,
            rows: grid.rows,
            cols: grid.cols,
        });
    }

    std::fs::create_dir_all(&grid.output_dir).map_err(|e| PlateError::OutputDir {
        path: grid.output_dir.clone(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        "Splitting {}x{} image into {}x{} grid",
        width,
        height,
        grid.rows,
        grid.cols
    );

    let mut crops = Vec::with_capacity(grid.cell_count());

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let bounds = cell_bounds(width, height, grid, row, col);
            let cell = image::imageops::crop_imm(
                &rgb,
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
            )
            .to_image();

            let path = grid.output_dir.join(crop_file_name(row, col));
            cell.save_with_format(&path, image::ImageFormat::Png)
                .map_err(|e| PlateError::ImageSave {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(
                "Wrote {:?} (rows {}..{}, cols {}..{})",
                path,
                bounds.top,
                bounds.bottom,
                bounds.left,
                bounds.right
            );

            crops.push(Crop {
                row,
                col,
                bounds,
                image: cell,
                path,
            });
        }
    }

    Ok(SplitOutcome {
        crops,
        output_dir: grid.output_dir.clone(),
    })
}
