mod analysis;
mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod report;
mod state;
mod ui;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use eframe::egui;

use analysis::pipeline::{analyze, load_dataset};
use app::FwhmViewerApp;
use config::AnalysisConfig;
use state::AppState;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Beam scan table (CSV with group, run, angle and intensity columns)
    pub input: Option<PathBuf>,
    /// Analysis settings in JSON format
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Use raw counts instead of normalizing every run by its maximum
    #[clap(long)]
    pub raw: bool,
    /// Write one SVG chart per group into this directory
    #[clap(long)]
    pub export: Option<PathBuf>,
    /// Write the FWHM table as CSV to this file
    #[clap(long)]
    pub results: Option<PathBuf>,
    /// Print the report and exit without opening the viewer
    #[clap(long)]
    pub no_gui: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if args.raw {
        config.normalize = false;
    }

    let mut state = AppState::new(config);

    match &args.input {
        Some(path) => {
            let dataset = load_dataset(path, &state.config)?;
            let analysis = analyze(&dataset, &state.config);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            report::write_preview(&mut out, &dataset, &state.config.columns)?;
            report::write_table(&mut out, &analysis.records)?;
            out.flush()?;

            if analysis.undefined_count() > 0 {
                log::warn!(
                    "{} run(s) have no usable half-maximum crossing",
                    analysis.undefined_count()
                );
            }
            if let Some(dir) = &args.export {
                export::write_group_svgs(dir, &analysis)?;
            }
            if let Some(file) = &args.results {
                report::write_results_file(file, &analysis.records)?;
            }

            state.set_dataset(dataset);
        }
        None if args.no_gui => bail!("an input file is required with --no-gui"),
        None => {
            if args.export.is_some() || args.results.is_some() {
                log::warn!("--export and --results need an input file; ignoring");
            }
        }
    }

    if args.no_gui {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FoV FWHM – Beam Pattern Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(FwhmViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer")
}
