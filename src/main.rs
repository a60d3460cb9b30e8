// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

use statement_visualizer::{dashboard_report, load_from_env, load_statements, telemetry, Settings};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let settings = load_from_env()?;

    if args.len() > 1 && args[1] == "report" {
        // Report mode: JSON on stdout, logs on stderr
        telemetry::init(&settings.log_filter)?;
        run_report(&settings)?;
    } else {
        // UI mode (default). Anything chattier than warn would draw over the screen
        telemetry::init("warn")?;
        run_ui_mode(&settings)?;
    }

    Ok(())
}

fn run_report(settings: &Settings) -> Result<()> {
    let statements = load_statements(settings).context("Loading statements for report")?;
    let report = dashboard_report(&statements, &settings.thresholds);
    tracing::info!("{}", report.summary());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    let statements = load_statements(settings).context("Loading statements for UI")?;

    let mut app = ui::App::new(&statements, &settings.thresholds);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   This binary was compiled without the 'tui' feature.");
    eprintln!("   Run: statement-visualizer report");
    eprintln!("   or rebuild with: cargo build --features tui");
    std::process::exit(1);
}
