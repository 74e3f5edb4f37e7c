use crate::config::OutputFormat;
use crate::recognizer::CellDigits;
use crate::splitter::{CellBounds, SplitOutcome};
use serde::Serialize;
use std::path::PathBuf;

/// Summary of one run, as printed to stdout
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub parts: usize,
    pub output_dir: PathBuf,
    pub cells: Vec<CellReport>,
}

#[derive(Debug, Serialize)]
pub struct CellReport {
    pub row: u32,
    pub col: u32,
    pub file: Option<PathBuf>,
    pub bounds: Option<CellBounds>,
    pub digits: Vec<u8>,
    pub text: String,
}

impl RunReport {
    pub fn new(outcome: &SplitOutcome, cells: Vec<CellDigits>) -> Self {
        let cells = cells
            .into_iter()
            .map(|cell| {
                let crop = outcome
                    .crops
                    .iter()
                    .find(|c| c.row + 1 == cell.row && c.col + 1 == cell.col);
                CellReport {
                    row: cell.row,
                    col: cell.col,
                    file: crop.map(|c| c.path.clone()),
                    bounds: crop.map(|c| c.bounds),
                    digits: cell.digits,
                    text: cell.text.trim().to_string(),
                }
            })
            .collect();

        Self {
            parts: outcome.crops.len(),
            output_dir: outcome.output_dir.clone(),
            cells,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn render_text(&self) -> String {
        let mut lines = vec![
            format!("Image split into {} parts", self.parts),
            format!("Subimages saved in directory: {}", self.output_dir.display()),
        ];

        let labelled = self.cells.len() > 1;
        for cell in &self.cells {
            let vector = format_vector(&cell.digits);
            if labelled {
                lines.push(format!(
                    "cell_{}_{}: Extracted vector: {}",
                    cell.row, cell.col, vector
                ));
            } else {
                lines.push(format!("Extracted vector: {}", vector));
            }
        }

        lines.join("\n")
    }
}

/// Format digits as `[1, 2, 3]`
pub fn format_vector(digits: &[u8]) -> String {
    let items: Vec<String> = digits.iter().map(|d| d.to_string()).collect();
    format!("[{}]", items.join(", "))
}
