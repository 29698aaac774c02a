use eframe::egui::{Color32, Ui};
use egui_plot::{uniform_grid_spacer, HLine, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::chart::{ANGLE_RANGE, ANGLE_STEP, X_LABEL};
use crate::color::{Dash, REFERENCE};
use crate::state::AppState;

fn color32(c: palette::Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

fn line_style(dash: Dash) -> LineStyle {
    match dash {
        Dash::Solid => LineStyle::Solid,
        Dash::LongDash => LineStyle::dashed_loose(),
        Dash::ShortDash => LineStyle::dashed_dense(),
        Dash::SparseDot => LineStyle::dotted_loose(),
        Dash::DenseDot => LineStyle::dotted_dense(),
    }
}

// ---------------------------------------------------------------------------
// Group plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected group's chart in the central panel.
pub fn group_plot(ui: &mut Ui, state: &AppState) {
    let Some(chart) = state.current_chart() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view beam scans  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    Plot::new(("group_plot", state.selected_group))
        .legend(Legend::default())
        .x_axis_label(X_LABEL)
        .y_axis_label(chart.y_label)
        .include_x(ANGLE_RANGE.0)
        .include_x(ANGLE_RANGE.1)
        .include_y(0.0)
        .x_grid_spacer(uniform_grid_spacer(|_| [ANGLE_STEP, 3.0 * ANGLE_STEP, 9.0 * ANGLE_STEP]))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(&series.label)
                    .color(color32(series.color))
                    .style(line_style(series.dash))
                    .width(1.5);
                plot_ui.line(line);

                // Unnamed, so it stays out of the legend.
                if let Some(h) = series.half_max {
                    plot_ui.hline(
                        HLine::new(h)
                            .color(color32(REFERENCE))
                            .style(LineStyle::dotted_dense()),
                    );
                }
            }
        });
}
