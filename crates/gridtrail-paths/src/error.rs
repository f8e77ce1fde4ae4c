//! Error types for topology construction and agent operations.
//!
//! An unreachable goal is not an error: searches return an empty
//! [`Path`](crate::Path) for it.

use gridtrail_core::Coordinate;
use std::fmt;

/// Errors raised while building or sampling a [`Topology`](crate::Topology).
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// Grid dimensions must both be positive.
    InvalidSize { size_x: i32, size_y: i32 },
    /// The traversed-cell discount must lie in `[0, 1)`.
    InvalidDiscount(f64),
    /// No traversable location could be drawn.
    NoTraversableLocation { attempts: usize },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { size_x, size_y } => {
                write!(f, "topology: invalid size {size_x}x{size_y}")
            }
            Self::InvalidDiscount(d) => {
                write!(f, "topology: traversed discount {d} not in [0, 1)")
            }
            Self::NoTraversableLocation { attempts } => {
                write!(
                    f,
                    "topology: no traversable location found after {attempts} attempts"
                )
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Errors raised by [`Agent`](crate::Agent) construction and searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The agent's location is not on the grid.
    OutOfBounds {
        location: Coordinate,
        size_x: i32,
        size_y: i32,
    },
    /// The requested goal is not on the grid.
    GoalOutOfBounds {
        goal: Coordinate,
        size_x: i32,
        size_y: i32,
    },
    /// A search was requested before a goal was set.
    NoGoal,
    /// The shared topology is borrowed mutably elsewhere.
    TopologyInUse,
    /// The agent's path is borrowed through a handle.
    StateInUse,
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                location,
                size_x,
                size_y,
            } => write!(f, "agent: location {location} not on {size_x}x{size_y} grid"),
            Self::GoalOutOfBounds {
                goal,
                size_x,
                size_y,
            } => write!(f, "agent: goal {goal} not on {size_x}x{size_y} grid"),
            Self::NoGoal => write!(f, "agent: no goal set"),
            Self::TopologyInUse => write!(f, "agent: topology is being modified"),
            Self::StateInUse => write!(f, "agent: state is borrowed elsewhere"),
        }
    }
}

impl std::error::Error for AgentError {}
