use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::pipeline::FwhmRecord;
use crate::config::ColumnNames;
use crate::data::model::BeamDataset;

pub const HEADER: &str = "Field of View, Run ID, FWHM (Left Bound), FWHM (Right Bound), FWHM";

/// Placeholder printed for every numeric field of an undefined result.
pub const UNDEFINED: &str = "N/A";

/// Rows shown by [`write_preview`].
pub const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Console table
// ---------------------------------------------------------------------------

/// One line of the metric table, numbers to two decimals.
pub fn format_record(record: &FwhmRecord) -> String {
    match &record.fwhm {
        Some(f) => format!(
            "{}, {}, {:.2}, {:.2}, {:.2}",
            record.group, record.run, f.left, f.right, f.bandwidth
        ),
        None => format!(
            "{}, {}, {UNDEFINED}, {UNDEFINED}, {UNDEFINED}",
            record.group, record.run
        ),
    }
}

pub fn write_table<W: Write>(out: &mut W, records: &[FwhmRecord]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for record in records {
        writeln!(out, "{}", format_record(record))?;
    }
    Ok(())
}

/// First rows of the loaded table, before any analysis.
pub fn write_preview<W: Write>(
    out: &mut W,
    dataset: &BeamDataset,
    columns: &ColumnNames,
) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<12} {:<12} {:>10} {:>12}",
        "", columns.group, columns.run, columns.angle, columns.intensity
    )?;
    for (i, s) in dataset.samples.iter().take(PREVIEW_ROWS).enumerate() {
        writeln!(
            out,
            "{i:>4}  {:<12} {:<12} {:>10} {:>12}",
            s.group, s.run, s.angle, s.intensity
        )?;
    }
    writeln!(out)
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    #[serde(rename = "Field of View")]
    group: &'a str,
    #[serde(rename = "Run ID")]
    run: &'a str,
    #[serde(rename = "FWHM (Left Bound)")]
    left: Option<f64>,
    #[serde(rename = "FWHM (Right Bound)")]
    right: Option<f64>,
    #[serde(rename = "FWHM")]
    bandwidth: Option<f64>,
    #[serde(rename = "Half Max")]
    half_max: Option<f64>,
}

impl<'a> From<&'a FwhmRecord> for ResultRow<'a> {
    fn from(r: &'a FwhmRecord) -> Self {
        ResultRow {
            group: &r.group,
            run: &r.run,
            left: r.fwhm.map(|f| f.left),
            right: r.fwhm.map(|f| f.right),
            bandwidth: r.fwhm.map(|f| f.bandwidth),
            half_max: r.fwhm.map(|f| f.half_max),
        }
    }
}

/// Write the metric table as CSV; undefined fields are left empty.
pub fn write_results<W: Write>(out: W, records: &[FwhmRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer
            .serialize(ResultRow::from(record))
            .with_context(|| format!("writing result for {} / {}", record.group, record.run))?;
    }
    writer.flush().context("flushing results")?;
    Ok(())
}

pub fn write_results_file(path: &Path, records: &[FwhmRecord]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_results(file, records)?;
    log::info!("Wrote {} result(s) to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fwhm::Fwhm;
    use crate::data::model::Sample;

    fn records() -> Vec<FwhmRecord> {
        vec![
            FwhmRecord {
                group: "FoV 1".to_string(),
                run: "Run 1".to_string(),
                fwhm: Some(Fwhm {
                    left: -10.0,
                    right: 12.346,
                    bandwidth: 22.346,
                    half_max: 0.5,
                }),
            },
            FwhmRecord {
                group: "FoV 1".to_string(),
                run: "Run 2".to_string(),
                fwhm: None,
            },
        ]
    }

    #[test]
    fn table_has_header_and_two_decimals() {
        let mut out = Vec::new();
        write_table(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "FoV 1, Run 1, -10.00, 12.35, 22.35");
    }

    #[test]
    fn undefined_rows_print_placeholders() {
        assert_eq!(format_record(&records()[1]), "FoV 1, Run 2, N/A, N/A, N/A");
    }

    #[test]
    fn missing_angle_prints_nan() {
        let record = FwhmRecord {
            group: "G".to_string(),
            run: "R".to_string(),
            fwhm: Some(Fwhm {
                left: f64::NAN,
                right: 1.0,
                bandwidth: f64::NAN,
                half_max: 0.5,
            }),
        };
        assert_eq!(format_record(&record), "G, R, NaN, 1.00, NaN");
    }

    #[test]
    fn csv_leaves_undefined_fields_empty() {
        let mut out = Vec::new();
        write_results(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Field of View,Run ID,FWHM (Left Bound),FWHM (Right Bound),FWHM,Half Max"
        );
        assert_eq!(lines[1], "FoV 1,Run 1,-10.0,12.346,22.346,0.5");
        assert_eq!(lines[2], "FoV 1,Run 2,,,,");
    }

    #[test]
    fn preview_is_capped() {
        let samples = (0..8)
            .map(|i| Sample {
                group: "FoV 1".to_string(),
                run: "Run 1".to_string(),
                angle: i as f64,
                intensity: 1.0,
            })
            .collect();
        let ds = BeamDataset::from_samples(samples, 0);
        let mut out = Vec::new();
        write_preview(&mut out, &ds, &ColumnNames::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().contains("Run ID"));
        // header, five rows, blank line
        assert_eq!(text.lines().count(), PREVIEW_ROWS + 2);
    }
}
