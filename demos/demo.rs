//! Two agents on a small grid, dumped as text.
//!
//! Run: cargo run --bin demo

use gridtrail_demos::{init_logging, two_agent_demo};
use gridtrail_paths::render_text;

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Error: {e}");
    }

    match two_agent_demo() {
        Ok((grid, agents)) => {
            for agent in &agents {
                let path = agent.path();
                let goal = agent.goal().map_or_else(|| "-".to_string(), |g| g.to_string());
                log::info!(
                    "{} -> {goal}: {} steps, cost {:.3}",
                    agent.location(),
                    path.len(),
                    path.cost()
                );
            }
            log::info!("\n{}", render_text(&grid.borrow()));
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
