use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::analysis::pipeline::{Analysis, RenderPass};
use crate::chart::{angle_ticks, build_charts, GroupChart, ANGLE_RANGE, X_LABEL};
use crate::color::{Dash, REFERENCE};

const SIZE: (u32, u32) = (1000, 500);

// ---------------------------------------------------------------------------
// SVG rendering
// ---------------------------------------------------------------------------

/// Dash length and gap in pixels, `None` for a solid stroke.
fn dash_spec(dash: Dash) -> Option<(u32, u32)> {
    match dash {
        Dash::Solid => None,
        Dash::LongDash => Some((12, 6)),
        Dash::ShortDash => Some((6, 4)),
        Dash::SparseDot => Some((2, 6)),
        Dash::DenseDot => Some((2, 2)),
    }
}

fn rgb(color: palette::Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

/// Render one group chart as an SVG document.
pub fn render_svg(chart: &GroupChart) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = chart.y_max();
        let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(ANGLE_RANGE.0..ANGLE_RANGE.1, 0f64..y_top)?;
        // 19 labels over 180 degrees lands the key points on every 10 degrees
        ctx.configure_mesh()
            .x_labels(angle_ticks().len())
            .x_desc(X_LABEL)
            .y_desc(chart.y_label)
            .draw()?;

        for series in &chart.series {
            let style = rgb(series.color).stroke_width(2);
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .filter(|p| p[0].is_finite() && p[1].is_finite())
                .map(|p| (p[0], p[1]))
                .collect();

            let anno = match dash_spec(series.dash) {
                None => ctx.draw_series(LineSeries::new(points, style))?,
                Some((size, gap)) => {
                    ctx.draw_series(DashedLineSeries::new(points, size, gap, style))?
                }
            };
            anno.label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

            if let Some(h) = series.half_max.filter(|h| h.is_finite()) {
                ctx.draw_series(DashedLineSeries::new(
                    vec![(ANGLE_RANGE.0, h), (ANGLE_RANGE.1, h)],
                    2,
                    3,
                    rgb(REFERENCE).stroke_width(1),
                ))?;
            }
        }

        if !chart.series.is_empty() {
            ctx.configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.8))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
        root.present()?;
    }
    Ok(svg)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// File stem for a group label: anything but ASCII alphanumerics, `-` and
/// `_` becomes `_`.
pub fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "group".to_string()
    } else {
        stem
    }
}

/// Write one SVG per group into `dir`, plus an `_ordered` variant per group
/// when a run priority list is configured.  Returns the written paths.
pub fn write_group_svgs(dir: &Path, analysis: &Analysis) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut passes = vec![(RenderPass::AllRuns, "")];
    if !analysis.run_priority.is_empty() {
        passes.push((RenderPass::Prioritized, "_ordered"));
    }

    let mut written = Vec::new();
    for (pass, suffix) in passes {
        for chart in build_charts(analysis, pass) {
            let path = dir.join(format!("{}{suffix}.svg", file_stem(&chart.title)));
            let svg = render_svg(&chart)
                .with_context(|| format!("rendering chart for '{}'", chart.title))?;
            std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{curve_color, curve_dash};

    fn chart() -> GroupChart {
        GroupChart {
            title: "FoV 1".to_string(),
            y_label: "PS Counts",
            series: vec![
                crate::chart::Series {
                    label: "Run 1".to_string(),
                    points: vec![[-10.0, 5.0], [0.0, 10.0], [10.0, f64::NAN]],
                    color: curve_color(0),
                    dash: curve_dash(0),
                    half_max: Some(5.0),
                },
                crate::chart::Series {
                    label: "Run 2".to_string(),
                    points: vec![[-20.0, 3.0], [20.0, 4.0]],
                    color: curve_color(1),
                    dash: curve_dash(1),
                    half_max: None,
                },
            ],
        }
    }

    #[test]
    fn svg_contains_title_axes_and_legend() {
        let svg = render_svg(&chart()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("FoV 1"));
        assert!(svg.contains("PS Counts"));
        assert!(svg.contains("Run 1"));
        assert!(svg.contains("Run 2"));
    }

    #[test]
    fn empty_chart_still_renders() {
        let empty = GroupChart {
            title: "empty".to_string(),
            y_label: "PS Counts",
            series: Vec::new(),
        };
        assert!(render_svg(&empty).is_ok());
    }

    #[test]
    fn writes_both_passes_per_group() {
        use crate::analysis::pipeline::analyze;
        use crate::config::AnalysisConfig;
        use crate::data::loader::load_csv;

        let config = AnalysisConfig::default();
        let table = "Type,Run ID,Angle,Intensity\nFoV 1,Run 1,-10,5\nFoV 1,Run 1,0,10\nFoV 1,Run 1,10,5\n";
        let dataset = load_csv(table.as_bytes(), &config.columns).unwrap();
        let analysis = analyze(&dataset, &config);

        let dir = std::env::temp_dir().join(format!("fov-fwhm-export-{}", std::process::id()));
        let written = write_group_svgs(&dir, &analysis).unwrap();
        assert_eq!(written, vec![dir.join("FoV_1.svg"), dir.join("FoV_1_ordered.svg")]);
        assert!(written.iter().all(|p| p.exists()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn stems_are_filesystem_safe() {
        assert_eq!(file_stem("FoV 1"), "FoV_1");
        assert_eq!(file_stem("a/b:c"), "a_b_c");
        assert_eq!(file_stem(""), "group");
    }

    #[test]
    fn every_dash_has_a_stroke() {
        assert_eq!(dash_spec(Dash::Solid), None);
        for dash in [Dash::LongDash, Dash::ShortDash, Dash::SparseDot, Dash::DenseDot] {
            let (size, gap) = dash_spec(dash).unwrap();
            assert!(size > 0 && gap > 0);
        }
    }
}
