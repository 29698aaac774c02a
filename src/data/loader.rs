use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{BeamDataset, Sample};
use crate::config::ColumnNames;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a beam dataset from a file.  Dispatch by extension.
///
/// Only flat comma-separated tables are supported; anything else is
/// rejected up front rather than guessed at.
pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<BeamDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file, columns).with_context(|| format!("loading {}", path.display()))
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one sample per row.
///
/// The group, run, angle and intensity columns are located by name; all
/// other columns are ignored.  Angle/intensity cells that do not parse as
/// numbers become `NaN` instead of failing the load.
pub fn load_csv<R: Read>(input: R, columns: &ColumnNames) -> Result<BeamDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let group_idx = position(&columns.group)?;
    let run_idx = position(&columns.run)?;
    let angle_idx = position(&columns.angle)?;
    let intensity_idx = position(&columns.intensity)?;

    let mut samples = Vec::new();
    let mut coerced = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut numeric = |idx: usize, col: &str| {
            let cell = record.get(idx).unwrap_or("");
            parse_cell(cell).unwrap_or_else(|| {
                log::debug!("row {row_no}: '{cell}' in column '{col}' is not a number");
                coerced += 1;
                f64::NAN
            })
        };
        let angle = numeric(angle_idx, &columns.angle);
        let intensity = numeric(intensity_idx, &columns.intensity);

        samples.push(Sample {
            group: text_cell(record.get(group_idx)),
            run: text_cell(record.get(run_idx)),
            angle,
            intensity,
        });
    }

    if coerced > 0 {
        log::warn!("{coerced} numeric cell(s) could not be parsed and were treated as missing");
    }

    Ok(BeamDataset::from_samples(samples, coerced))
}

/// Parse a numeric cell; empty cells count as unparseable.
fn parse_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok()
}

/// Text cells render missing values the same way the numeric side does, so
/// a blank label still forms its own group instead of vanishing.
fn text_cell(cell: Option<&str>) -> String {
    match cell {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "nan".to_string(),
    }
}
