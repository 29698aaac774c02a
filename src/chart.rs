use palette::Srgb;

use crate::analysis::pipeline::{Analysis, GroupTraces, RenderPass};
use crate::color::{curve_color, curve_dash, Dash};

/// Fixed angular domain of every chart, in degrees.
pub const ANGLE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Tick / grid spacing along the angle axis, in degrees.
pub const ANGLE_STEP: f64 = 10.0;

pub const X_LABEL: &str = "Angle (°)";

/// Tick positions along the angle axis: -90, -80, ..., 90.
pub fn angle_ticks() -> Vec<f64> {
    let n = ((ANGLE_RANGE.1 - ANGLE_RANGE.0) / ANGLE_STEP).round() as usize;
    (0..=n).map(|i| ANGLE_RANGE.0 + i as f64 * ANGLE_STEP).collect()
}

/// One curve of a group chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry: the run id.
    pub label: String,
    pub points: Vec<[f64; 2]>,
    pub color: Srgb<u8>,
    pub dash: Dash,
    /// Height of the unlabeled half-maximum reference line, if any.
    pub half_max: Option<f64>,
}

/// Renderer-independent description of one group's comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupChart {
    pub title: String,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl GroupChart {
    pub fn build(group: &GroupTraces, pass: RenderPass, analysis: &Analysis) -> Self {
        let series = group
            .render_order(pass, &analysis.run_priority)
            .into_iter()
            .enumerate()
            .map(|(i, trace)| Series {
                label: trace.run.clone(),
                points: trace
                    .angles
                    .iter()
                    .zip(&trace.intensities)
                    .map(|(&a, &v)| [a, v])
                    .collect(),
                color: curve_color(i),
                dash: curve_dash(i),
                half_max: trace.fwhm.map(|f| f.half_max),
            })
            .collect();

        GroupChart {
            title: group.label.clone(),
            y_label: y_label(analysis.normalized),
            series,
        }
    }

    /// Largest finite value the y axis has to show (curves and reference
    /// lines), never below zero.
    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p[1]).chain(s.half_max))
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Charts for every group of `analysis`.
pub fn build_charts(analysis: &Analysis, pass: RenderPass) -> Vec<GroupChart> {
    analysis
        .groups
        .iter()
        .map(|g| GroupChart::build(g, pass, analysis))
        .collect()
}

pub fn y_label(normalized: bool) -> &'static str {
    if normalized {
        "Normalized PS Counts"
    } else {
        "PS Counts"
    }
}
