use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::pipeline::RenderPass;
use crate::report::{write_table, UNDEFINED};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – group list
// ---------------------------------------------------------------------------

/// Render the left group panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Fields of View");
    ui.separator();

    if state.charts.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, chart) in state.charts.iter().enumerate() {
                let text = format!("{}  ({} runs)", chart.title, chart.series.len());
                if ui
                    .selectable_label(state.selected_group == i, text)
                    .clicked()
                {
                    clicked = Some(i);
                }
            }
        });

    if let Some(i) = clicked {
        state.selected_group = i;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} samples, {} groups",
                ds.len(),
                ds.group_labels.len()
            ));
            if ds.coerced_cells > 0 {
                ui.label(
                    RichText::new(format!("{} unparseable cells", ds.coerced_cells))
                        .color(Color32::YELLOW),
                );
            }
        }

        ui.separator();

        if ui
            .selectable_label(state.config.normalize, "Normalized")
            .clicked()
        {
            state.set_normalize(!state.config.normalize);
        }

        let prioritized = state.pass == RenderPass::Prioritized;
        let priority_enabled = !state.config.run_priority.is_empty();
        if ui
            .add_enabled(
                priority_enabled,
                egui::SelectableLabel::new(prioritized, "Priority order"),
            )
            .on_hover_text(state.config.run_priority.join(", "))
            .clicked()
        {
            state.set_pass(if prioritized {
                RenderPass::AllRuns
            } else {
                RenderPass::Prioritized
            });
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – FWHM table
// ---------------------------------------------------------------------------

/// Render the metric table of the latest analysis.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };

    let cell = |v: Option<f64>| match v {
        Some(v) => format!("{v:.2}"),
        None => UNDEFINED.to_string(),
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(110.0), 3)
        .header(20.0, |mut header| {
            for title in [
                "Field of View",
                "Run ID",
                "FWHM (Left Bound)",
                "FWHM (Right Bound)",
                "FWHM",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in &analysis.records {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.group);
                    });
                    row.col(|ui| {
                        ui.label(&record.run);
                    });
                    for value in [
                        record.fwhm.map(|f| f.left),
                        record.fwhm.map(|f| f.right),
                        record.fwhm.map(|f| f.bandwidth),
                    ] {
                        row.col(|ui| {
                            ui.label(cell(value));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open beam scan table")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match state.load(&path) {
            Ok(()) => {
                if let Some(analysis) = &state.analysis {
                    let mut out = std::io::stdout().lock();
                    if let Err(e) = write_table(&mut out, &analysis.records) {
                        log::warn!("Failed to print FWHM table: {e}");
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
