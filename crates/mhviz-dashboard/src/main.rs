#![forbid(unsafe_code)]

//! Dashboard binary.

use std::process;
use std::sync::Arc;

use mhviz_dashboard::app::DashboardApp;
use mhviz_dashboard::{cli, logging};
use mhviz_model::{DatasetProvider, SampleDataset};
use mhviz_runtime::{Program, ProgramConfig};
use tracing::{info, warn};

fn main() {
    let opts = cli::Opts::parse();

    match logging::init(opts.log_file.as_deref()) {
        Ok(true) => info!(version = env!("CARGO_PKG_VERSION"), "mhviz starting"),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Cannot open log file: {e}");
            process::exit(1);
        }
    }

    let dataset = match SampleDataset::new().horizon(opts.iterations).load() {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            eprintln!("Cannot load dataset: {e}");
            process::exit(1);
        }
    };
    for issue in &dataset.validate().issues {
        warn!(%issue, "dataset issue");
    }

    let mut app = DashboardApp::new(dataset, opts.stride);
    if let Some(name) = opts.panel.as_deref() {
        let Some(index) = app.router().position_by_name(name) else {
            let known: Vec<&str> = app.router().panels().iter().map(|p| p.id.name()).collect();
            eprintln!("Unknown panel: {name} (expected one of: {})", known.join(", "));
            process::exit(cli::EXIT_USAGE);
        };
        app.router_mut().select_index(index);
    }

    let config = if opts.alt_screen {
        ProgramConfig::fullscreen()
    } else {
        ProgramConfig::inline()
    };
    match Program::new(app, config).and_then(|mut program| program.run()) {
        Ok(()) => info!("mhviz exited"),
        Err(e) => {
            eprintln!("Runtime error: {e}");
            process::exit(1);
        }
    }
}
