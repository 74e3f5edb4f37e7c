use crate::config::{CellSelection, Config};
use crate::engines::{self, EngineRegistry};
use crate::error::PlateError;
use crate::preprocessing::Pipeline;
use crate::recognizer::DigitReader;
use crate::report::RunReport;
use crate::splitter::{self, Crop};
use std::time::Instant;

/// Split the sheet, read the selected crops and print the report
pub fn run(config: Config) -> anyhow::Result<()> {
    let start = Instant::now();

    let image = splitter::load_image(&config.image_path)?;
    let outcome = splitter::split_image(&image, &config.grid)?;

    tracing::info!(
        "Wrote {} crops to {:?} in {}ms",
        outcome.crops.len(),
        outcome.output_dir,
        start.elapsed().as_millis()
    );

    let selected = select_crops(&outcome.crops, config.selection);
    let cells = if selected.is_empty() {
        Vec::new()
    } else {
        let engine_name = match config.engine.as_deref() {
            Some(name) => name,
            None => engines::default_name().ok_or_else(|| {
                PlateError::InitializationError(
                    "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess"
                        .to_string(),
                )
            })?,
        };
        let engine = EngineRegistry::new(config.tessdata_path.clone()).create(engine_name)?;
        let reader = DigitReader::new(Pipeline::new(config.preset), engine);
        reader.read_all(selected)?
    };

    let report = RunReport::new(&outcome, cells);
    println!("{}", report.render(config.format)?);

    tracing::debug!("Finished in {}ms", start.elapsed().as_millis());
    Ok(())
}

fn select_crops(crops: &[Crop], selection: CellSelection) -> Vec<&Crop> {
    match selection {
        CellSelection::First => crops.iter().take(1).collect(),
        CellSelection::All => crops.iter().collect(),
        CellSelection::None => Vec::new(),
    }
}
