//! Shared scenario setup for the demo binaries.
//!
//! Demonstrates: building a topology from config, blocking areas, running
//! agents one after another and feeding their paths back as traversed cells
//! so later searches favour established routes.

pub mod logger;

use std::cell::RefCell;
use std::fmt;
use std::path::Path as FsPath;
use std::rc::Rc;

use gridtrail_core::Coordinate;
use gridtrail_paths::{Agent, AgentError, SharedTopology, Topology, TopologyConfig, TopologyError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

pub use logger::{ElapsedLogger, init_logging};

/// Block used by both demos, as inclusive corners.
pub const DEMO_BLOCK: [Coordinate; 2] = [Coordinate::new(5, 2), Coordinate::new(6, 3)];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that can stop a demo.
#[derive(Debug)]
pub enum DemoError {
    Io(std::io::Error),
    Config(serde_json::Error),
    Topology(TopologyError),
    Agent(AgentError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "reading scenario: {e}"),
            Self::Config(e) => write!(f, "parsing scenario: {e}"),
            Self::Topology(e) => write!(f, "{e}"),
            Self::Agent(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Topology(e) => Some(e),
            Self::Agent(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

impl From<TopologyError> for DemoError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

impl From<AgentError> for DemoError {
    fn from(e: AgentError) -> Self {
        Self::Agent(e)
    }
}

// ---------------------------------------------------------------------------
// Scenario config
// ---------------------------------------------------------------------------

/// Many-agent scenario parameters, loadable from JSON.
///
/// Missing fields take the values of [`ScenarioConfig::default`]:
///
/// ```json
/// { "topology": { "size_x": 32, "size_y": 32 }, "agents": 20, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub topology: TopologyConfig,
    pub agents: usize,
    pub seed: u64,
    /// Impassable rectangles, each given by two inclusive corners.
    pub blocks: Vec<[Coordinate; 2]>,
    /// Feed each finished path back as traversed cells.
    pub record_traversed: bool,
}

/// The plain many-agent demo: no traversed discount. Set
/// `topology.prefer_traversed_discount` to `0.5` for the variant that favours
/// recorded paths.
impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            topology: TopologyConfig::new(64, 64),
            agents: 100,
            seed: 42,
            blocks: vec![DEMO_BLOCK],
            record_traversed: true,
        }
    }
}

impl ScenarioConfig {
    pub fn from_json(s: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &FsPath) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the topology with every block applied.
    pub fn build_topology(&self) -> Result<SharedTopology, DemoError> {
        let mut topology = Topology::from_config(self.topology)?;
        for [a, b] in &self.blocks {
            topology.set_impassable_area(*a, *b);
        }
        Ok(Rc::new(RefCell::new(topology)))
    }
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// Totals over a many-agent run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub searches: usize,
    pub found: usize,
    pub total_cost: f64,
    pub traversed: usize,
}

/// The two-agent demo: a 10×10 grid with a 2×2 block.
pub fn two_agent_demo() -> Result<(SharedTopology, Vec<Agent>), DemoError> {
    let grid = Rc::new(RefCell::new(Topology::new(10, 10)?));
    grid.borrow_mut().set_impassable_area(DEMO_BLOCK[0], DEMO_BLOCK[1]);

    let routes = [
        (Coordinate::new(6, 7), Coordinate::new(5, 0)),
        (Coordinate::new(8, 2), Coordinate::new(1, 5)),
    ];
    let mut agents = Vec::with_capacity(routes.len());
    for (start, goal) in routes {
        let mut agent = Agent::new(&grid, start)?;
        agent.search_to(goal)?;
        agents.push(agent);
    }
    Ok((grid, agents))
}

/// Place `cfg.agents` agents at random traversable cells and search for a
/// random goal each, strictly one after another.
pub fn run_many_agents(
    cfg: &ScenarioConfig,
) -> Result<(SharedTopology, Vec<Agent>, RunSummary), DemoError> {
    let grid = cfg.build_topology()?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut summary = RunSummary::default();

    let mut agents = Vec::with_capacity(cfg.agents);
    for _ in 0..cfg.agents {
        let location = grid.borrow().random_location(&mut rng, false)?;
        agents.push(Agent::new(&grid, location)?);
    }

    for (count, agent) in agents.iter_mut().enumerate() {
        let goal = grid.borrow().random_location(&mut rng, false)?;
        let path = agent.search_to(goal)?;
        summary.searches += 1;
        if !path.is_empty() {
            summary.found += 1;
            summary.total_cost += path.cost();
        }
        if cfg.record_traversed {
            summary.traversed += agent.record_traversed()?;
        }
        log::info!("search {}/{} complete.", count + 1, cfg.agents);
    }
    Ok((grid, agents, summary))
}
