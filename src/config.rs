use crate::error::PlateError;
use crate::preprocessing::Preset;
use crate::Args;
use std::path::PathBuf;

pub const DEFAULT_ROWS: u32 = 6;
pub const DEFAULT_COLS: u32 = 5;
pub const DEFAULT_OUTPUT_DIR: &str = "split_images";

/// Grid layout of the scanned sheet and where its crops are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub output_dir: PathBuf,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), PlateError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PlateError::InvalidGrid(format!(
                "rows and columns must be positive (got {}x{})",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Number of crops a split produces
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Which crops are sent through OCR after splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSelection {
    /// Only the top-left crop
    First,
    /// Every crop, row-major
    All,
    /// Split only, no OCR
    None,
}

/// Console report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image_path: PathBuf,
    pub grid: GridConfig,
    /// OCR engine name; the first compiled engine when unset
    pub engine: Option<String>,
    pub preset: Preset,
    pub selection: CellSelection,
    pub format: OutputFormat,
    pub tessdata_path: Option<String>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let selection = if args.split_only {
            CellSelection::None
        } else if args.all_cells {
            CellSelection::All
        } else {
            CellSelection::First
        };

        Self {
            image_path: args.image,
            grid: GridConfig {
                rows: args.rows,
                cols: args.cols,
                output_dir: args.output_dir,
            },
            engine: args.engine,
            preset: args.preprocess,
            selection,
            format: args.format,
            tessdata_path: args.tessdata_path,
        }
    }
}
