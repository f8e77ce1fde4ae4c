//! Many agents searching one after another on a shared grid.
//!
//! Run: cargo run --bin demo-many-agents [scenario.json]
//!
//! Set `GRIDTRAIL_LOG=debug` to see per-search statistics.

use std::path::PathBuf;

use gridtrail_demos::{DemoError, ScenarioConfig, init_logging, run_many_agents};
use gridtrail_paths::render_text;

fn run() -> Result<(), DemoError> {
    let cfg = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("loading scenario from {}", path.display());
            ScenarioConfig::load(&path)?
        }
        None => ScenarioConfig::default(),
    };

    let (grid, _agents, summary) = run_many_agents(&cfg)?;
    log::info!(
        "{}/{} routes found, total cost {:.1}, {} cells traversed",
        summary.found,
        summary.searches,
        summary.total_cost,
        summary.traversed
    );
    log::debug!("\n{}", render_text(&grid.borrow()));
    Ok(())
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Error: {e}");
    }
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
