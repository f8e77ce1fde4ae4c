//! Uniform-cost path-finding for agents moving over a shared 2D grid.
//!
//! The engine is split the same way the search itself reads:
//!
//! - [`Topology`] owns the grid bounds, impassable and traversed cells and the
//!   edge-cost function (Euclidean, optionally discounted on traversed cells).
//! - [`Frontier`] is a lazy-deletion min-priority queue of coordinates.
//! - [`uniform_cost_search`] is a Dijkstra variant with early exit that
//!   returns an ordered [`Path`] from start to goal.
//! - [`Agent`] binds a location and goal to a [`SharedTopology`] and keeps
//!   the result of its most recent search.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration, endpoint checks |
//! | [`WeightedPather`] : [`Pather`] | [`uniform_cost_search`] |

mod agent;
mod distance;
mod error;
mod frontier;
mod neighbors;
mod render;
mod search;
mod topology;
mod traits;

pub use agent::{Agent, AgentHandle, SharedTopology};
pub use distance::euclidean;
pub use error::{AgentError, TopologyError};
pub use frontier::{Frontier, FrontierEntry};
pub use neighbors::Moves;
pub use render::render_text;
pub use search::{
    Path, Predecessor, SearchState, SearchStats, search_with_stats, uniform_cost_search,
};
pub use topology::{IMPASSABLE_MAP_CHAR, RANDOM_LOCATION_ATTEMPTS, Topology, TopologyConfig};
pub use traits::{Pather, WeightedPather};

pub use gridtrail_core::{Coordinate, Range};
