use std::path::Path;

use anyhow::Result;

use crate::analysis::pipeline::{analyze, load_dataset, Analysis, RenderPass};
use crate::chart::{build_charts, GroupChart};
use crate::config::AnalysisConfig;
use crate::data::model::BeamDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Settings every analysis is run with; the UI toggles edit a copy here.
    pub config: AnalysisConfig,

    /// Loaded dataset with corrected labels (None until a file is loaded).
    pub dataset: Option<BeamDataset>,

    /// Latest analysis of `dataset`.
    pub analysis: Option<Analysis>,

    /// Charts for the current render pass, one per group.
    pub charts: Vec<GroupChart>,

    /// Which runs the charts show.
    pub pass: RenderPass,

    /// Index into `charts` of the group on screen.
    pub selected_group: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            dataset: None,
            analysis: None,
            charts: Vec::new(),
            pass: RenderPass::AllRuns,
            selected_group: 0,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and analyze it.
    pub fn set_dataset(&mut self, dataset: BeamDataset) {
        self.dataset = Some(dataset);
        self.selected_group = 0;
        self.status_message = None;
        self.reanalyze();
    }

    /// Load `path` with the current config and make it the active dataset.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let dataset = load_dataset(path, &self.config)?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Recompute the analysis after a config change.
    pub fn reanalyze(&mut self) {
        self.analysis = self.dataset.as_ref().map(|ds| analyze(ds, &self.config));
        self.rebuild_charts();
    }

    /// Rebuild the charts after a render pass change.
    pub fn rebuild_charts(&mut self) {
        self.charts = match &self.analysis {
            Some(a) => build_charts(a, self.pass),
            None => Vec::new(),
        };
        if self.selected_group >= self.charts.len() {
            self.selected_group = 0;
        }
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        if self.config.normalize != normalize {
            self.config.normalize = normalize;
            self.reanalyze();
        }
    }

    pub fn set_pass(&mut self, pass: RenderPass) {
        if self.pass != pass {
            self.pass = pass;
            self.rebuild_charts();
        }
    }

    pub fn current_chart(&self) -> Option<&GroupChart> {
        self.charts.get(self.selected_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::apply_corrections;
    use crate::data::loader::load_csv;

    const TABLE: &str = "\
Type,Run ID,Angle,Intensity
FoV1,Run 1,-10,5
FoV1,Run 1,0,10
FoV1,Run 1,10,5
FoV1,Run 4,0,10
FoV1,Run 4,10,10
FoV 2,Run 2,0,3
FoV 2,Run 2,5,3
";

    fn loaded() -> AppState {
        let config = AnalysisConfig::default();
        let ds = load_csv(TABLE.as_bytes(), &config.columns).unwrap();
        let ds = apply_corrections(ds, &config.label_corrections);
        let mut state = AppState::new(config);
        state.set_dataset(ds);
        state
    }

    #[test]
    fn loading_builds_one_chart_per_group() {
        let state = loaded();
        assert_eq!(state.charts.len(), 2);
        assert_eq!(state.current_chart().unwrap().title, "FoV 1");
        assert_eq!(state.analysis.as_ref().unwrap().records.len(), 3);
    }

    #[test]
    fn toggling_normalization_recomputes() {
        let mut state = loaded();
        state.set_normalize(false);
        let chart = state.current_chart().unwrap();
        assert_eq!(chart.y_label, "PS Counts");
        assert_eq!(chart.series[0].half_max, Some(5.0));
    }

    #[test]
    fn prioritized_pass_hides_unlisted_runs() {
        let mut state = loaded();
        state.set_pass(RenderPass::Prioritized);
        let labels: Vec<&str> = state.charts[0].series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Run 1"]);
        // metric table still covers every run
        assert_eq!(state.analysis.as_ref().unwrap().records.len(), 3);
    }

    #[test]
    fn empty_state_has_no_charts() {
        let mut state = AppState::new(AnalysisConfig::default());
        state.reanalyze();
        assert!(state.current_chart().is_none());
    }
}
