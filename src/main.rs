use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod engine;
mod engines;
mod error;
mod preprocessing;
mod recognizer;
mod report;
mod splitter;

use config::{OutputFormat, DEFAULT_COLS, DEFAULT_OUTPUT_DIR, DEFAULT_ROWS};
use preprocessing::Preset;

#[derive(Parser, Debug)]
#[command(name = "plate-digits")]
#[command(about = "Split a scanned sheet of plates into grid crops and read their numeric codes")]
#[command(version)]
pub struct Args {
    /// Scanned sheet image to split
    pub image: PathBuf,

    /// Number of grid rows
    #[arg(long, env = "PLATE_ROWS", default_value_t = DEFAULT_ROWS)]
    pub rows: u32,

    /// Number of grid columns
    #[arg(long, env = "PLATE_COLS", default_value_t = DEFAULT_COLS)]
    pub cols: u32,

    /// Directory the crops are written to
    #[arg(long, env = "PLATE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// OCR engine (ocrs, leptess); defaults to the first compiled engine
    #[arg(long, env = "PLATE_ENGINE")]
    pub engine: Option<String>,

    /// Preprocessing applied to crops before OCR
    #[arg(long, value_enum, default_value_t = Preset::Otsu)]
    pub preprocess: Preset,

    /// Read digits from every crop instead of only the first
    #[arg(long, conflicts_with = "split_only")]
    pub all_cells: bool,

    /// Only split the sheet, skip OCR
    #[arg(long)]
    pub split_only: bool,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to tessdata directory (uses the download cache if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting plate-digits v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from(args);
    tracing::info!(
        "Reading {:?} ({}x{} grid, preset {})",
        config.image_path,
        config.grid.rows,
        config.grid.cols,
        config.preset.as_str()
    );

    app::run(config)
}
