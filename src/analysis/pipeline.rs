use std::path::Path;

use anyhow::Result;

use super::fwhm::{extract, Fwhm};
use super::normalize::prepare;
use crate::config::AnalysisConfig;
use crate::data::labels::apply_corrections;
use crate::data::loader::load_file;
use crate::data::model::BeamDataset;
use crate::data::ordering::ordered_runs;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One row of the metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct FwhmRecord {
    pub group: String,
    pub run: String,
    /// `None` when fewer than two samples reach half maximum.
    pub fwhm: Option<Fwhm>,
}

/// A run as drawn: angles plus the intensities the extractor saw.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTrace {
    pub run: String,
    pub angles: Vec<f64>,
    pub intensities: Vec<f64>,
    pub fwhm: Option<Fwhm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTraces {
    pub label: String,
    /// Runs in first-appearance order.
    pub runs: Vec<RunTrace>,
}

/// Which runs a chart shows, and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Every run, in first-appearance order.
    AllRuns,
    /// Only runs named in the priority list, in priority order.
    Prioritized,
}

impl GroupTraces {
    /// Runs to draw for `pass`.
    pub fn render_order<'a>(&'a self, pass: RenderPass, priority: &[String]) -> Vec<&'a RunTrace> {
        match pass {
            RenderPass::AllRuns => self.runs.iter().collect(),
            RenderPass::Prioritized => {
                let present: Vec<&str> = self.runs.iter().map(|r| r.run.as_str()).collect();
                ordered_runs(priority, &present)
                    .iter()
                    .filter_map(|id| self.runs.iter().find(|r| &r.run == id))
                    .collect()
            }
        }
    }
}

/// Output of one pass over a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Whether intensities were normalized per run.
    pub normalized: bool,
    pub run_priority: Vec<String>,
    pub groups: Vec<GroupTraces>,
    /// Metric table, one entry per (group, run) in group then run order.
    pub records: Vec<FwhmRecord>,
}

impl Analysis {
    /// Number of runs whose FWHM could not be determined.
    pub fn undefined_count(&self) -> usize {
        self.records.iter().filter(|r| r.fwhm.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Load a table and apply the configured label corrections.
pub fn load_dataset(path: &Path, config: &AnalysisConfig) -> Result<BeamDataset> {
    let dataset = load_file(path, &config.columns)?;
    log::info!(
        "Loaded {} samples in {} group(s) from {}",
        dataset.len(),
        dataset.group_labels.len(),
        path.display()
    );
    if dataset.is_empty() {
        log::warn!("{} has a header but no samples", path.display());
    }
    Ok(apply_corrections(dataset, &config.label_corrections))
}

/// Extract the FWHM of every run in `dataset`.
pub fn analyze(dataset: &BeamDataset, config: &AnalysisConfig) -> Analysis {
    let mut records = Vec::new();
    let mut groups = Vec::new();

    for group in dataset.groups(config.sample_order()) {
        let mut traces = Vec::with_capacity(group.runs.len());
        for run in group.runs {
            let intensities = prepare(&run.intensities, config.normalize);
            let fwhm = extract(&run.angles, &intensities);
            match &fwhm {
                Some(f) => log::debug!(
                    "{} / {}: half max {:.4}, bounds {:.2}..{:.2}",
                    group.label,
                    run.id,
                    f.half_max,
                    f.left,
                    f.right
                ),
                None => log::warn!(
                    "{} / {}: fewer than two samples at or above half maximum",
                    group.label,
                    run.id
                ),
            }

            records.push(FwhmRecord {
                group: group.label.clone(),
                run: run.id.clone(),
                fwhm,
            });
            traces.push(RunTrace {
                run: run.id,
                angles: run.angles,
                intensities,
                fwhm,
            });
        }
        groups.push(GroupTraces {
            label: group.label,
            runs: traces,
        });
    }

    Analysis {
        normalized: config.normalize,
        run_priority: config.run_priority.clone(),
        groups,
        records,
    }
}
