//! Agents: a location and goal bound to a shared [`Topology`].

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use gridtrail_core::Coordinate;

use crate::error::AgentError;
use crate::search::{Path, uniform_cost_search};
use crate::topology::Topology;

/// Shared handle to a topology used by several agents.
///
/// Searches borrow it immutably; setup code and post-search recording
/// borrow it mutably in between.
pub type SharedTopology = Rc<RefCell<Topology>>;

/// Observable state of an agent. Shared with the topology's registry.
#[derive(Debug)]
pub(crate) struct AgentState {
    location: Coordinate,
    goal: Option<Coordinate>,
    path: Path,
}

/// Read-only view of an agent, as yielded by [`Topology::agents`].
#[derive(Debug, Clone)]
pub struct AgentHandle {
    state: Rc<RefCell<AgentState>>,
}

impl AgentHandle {
    pub(crate) fn from_state(state: Rc<RefCell<AgentState>>) -> Self {
        Self { state }
    }

    pub fn location(&self) -> Coordinate {
        self.state.borrow().location
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.state.borrow().goal
    }

    /// Result of the most recent search; empty if none ran or none was found.
    pub fn path(&self) -> Ref<'_, Path> {
        Ref::map(self.state.borrow(), |s| &s.path)
    }

    /// Whether both handles view the same agent.
    pub fn same_agent(&self, other: &AgentHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// One agent searching for a route across a [`SharedTopology`].
///
/// Creating an agent registers it with the topology so that renderers can
/// enumerate it. Registration does not affect traversability.
#[derive(Debug)]
pub struct Agent {
    grid: SharedTopology,
    handle: AgentHandle,
}

impl Agent {
    /// Create an agent at `location`, which must be within the topology.
    pub fn new(grid: &SharedTopology, location: Coordinate) -> Result<Self, AgentError> {
        let mut topology = grid.try_borrow_mut().map_err(|_| AgentError::TopologyInUse)?;
        if !topology.in_bounds(location) {
            return Err(AgentError::OutOfBounds {
                location,
                size_x: topology.size_x(),
                size_y: topology.size_y(),
            });
        }
        let state = Rc::new(RefCell::new(AgentState {
            location,
            goal: None,
            path: Path::default(),
        }));
        topology.register(&state);
        Ok(Self {
            grid: Rc::clone(grid),
            handle: AgentHandle::from_state(state),
        })
    }

    pub fn grid(&self) -> &SharedTopology {
        &self.grid
    }

    /// A view of this agent that outlives borrows of `self`.
    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    pub fn location(&self) -> Coordinate {
        self.handle.location()
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.handle.goal()
    }

    pub fn path(&self) -> Ref<'_, Path> {
        self.handle.path()
    }

    /// Set the goal for the next search. It must be within the topology.
    pub fn set_goal(&mut self, goal: Coordinate) -> Result<(), AgentError> {
        let topology = self.grid.try_borrow().map_err(|_| AgentError::TopologyInUse)?;
        if !topology.in_bounds(goal) {
            return Err(AgentError::GoalOutOfBounds {
                goal,
                size_x: topology.size_x(),
                size_y: topology.size_y(),
            });
        }
        self.state_mut()?.goal = Some(goal);
        Ok(())
    }

    pub fn clear_goal(&mut self) -> Result<(), AgentError> {
        self.state_mut()?.goal = None;
        Ok(())
    }

    /// Mutable access to the shared state. Fails while any handle still
    /// holds a [`path`](AgentHandle::path) borrow.
    fn state_mut(&self) -> Result<RefMut<'_, AgentState>, AgentError> {
        self.handle
            .state
            .try_borrow_mut()
            .map_err(|_| AgentError::StateInUse)
    }

    /// Run a uniform-cost search from the agent's location to its goal.
    ///
    /// The result replaces the stored path and is also returned. An
    /// unreachable goal yields an empty path, not an error.
    pub fn uniform_cost_search(&mut self) -> Result<Path, AgentError> {
        let goal = self.goal().ok_or(AgentError::NoGoal)?;
        let start = self.location();
        let mut state = self.state_mut()?;
        let topology = self.grid.try_borrow().map_err(|_| AgentError::TopologyInUse)?;
        let path = uniform_cost_search(&*topology, start, goal);
        drop(topology);

        if path.is_empty() {
            log::debug!("agent at {start}: no route to {goal}");
        }
        state.path = path.clone();
        Ok(path)
    }

    /// Set `goal` and search for it.
    pub fn search_to(&mut self, goal: Coordinate) -> Result<Path, AgentError> {
        self.set_goal(goal)?;
        self.uniform_cost_search()
    }

    /// Copy the most recent path into the topology's traversed set, so that
    /// later searches can be biased toward it.
    ///
    /// Returns the number of cells that were not traversed before.
    pub fn record_traversed(&self) -> Result<usize, AgentError> {
        let mut topology = self
            .grid
            .try_borrow_mut()
            .map_err(|_| AgentError::TopologyInUse)?;
        let path = self.handle.path();
        Ok(path
            .iter()
            .filter(|&&c| topology.add_traversed(c))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::TopologyConfig;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn shared(size_x: i32, size_y: i32) -> SharedTopology {
        Rc::new(RefCell::new(Topology::new(size_x, size_y).unwrap()))
    }

    #[test]
    fn out_of_bounds_agent_is_rejected() {
        let grid = shared(2, 2);
        let err = Agent::new(&grid, c(1, 2)).unwrap_err();
        assert_eq!(
            err,
            AgentError::OutOfBounds {
                location: c(1, 2),
                size_x: 2,
                size_y: 2
            }
        );
        assert_eq!(grid.borrow().agents().count(), 0);
    }

    #[test]
    fn search_happy_path() {
        let grid = shared(3, 3);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        assert!(agent.path().is_empty());
        let path = agent.search_to(c(2, 2)).unwrap();
        assert_eq!(path.steps(), &[c(0, 0), c(1, 1), c(2, 2)]);
        assert_eq!(*agent.path(), path);
        assert_eq!(agent.goal(), Some(c(2, 2)));
    }

    #[test]
    fn search_without_goal_fails() {
        let grid = shared(3, 3);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        assert_eq!(agent.uniform_cost_search(), Err(AgentError::NoGoal));
        agent.set_goal(c(1, 1)).unwrap();
        agent.clear_goal().unwrap();
        assert_eq!(agent.uniform_cost_search(), Err(AgentError::NoGoal));
    }

    #[test]
    fn goal_must_be_in_bounds() {
        let grid = shared(3, 3);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        assert!(matches!(
            agent.set_goal(c(3, 0)),
            Err(AgentError::GoalOutOfBounds { .. })
        ));
        assert_eq!(agent.goal(), None);
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let grid = shared(3, 3);
        grid.borrow_mut().set_impassable_area(c(0, 1), c(2, 1));
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        let path = agent.search_to(c(2, 2)).unwrap();
        assert!(path.is_empty());
        assert!(agent.path().is_empty());
    }

    #[test]
    fn topology_borrowed_mutably_blocks_search() {
        let grid = shared(3, 3);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        agent.set_goal(c(2, 2)).unwrap();
        let guard = grid.borrow_mut();
        assert_eq!(agent.uniform_cost_search(), Err(AgentError::TopologyInUse));
        assert!(matches!(
            Agent::new(&grid, c(1, 1)),
            Err(AgentError::TopologyInUse)
        ));
        drop(guard);
        assert!(agent.uniform_cost_search().is_ok());
    }

    #[test]
    fn held_path_borrow_blocks_updates() {
        let grid = shared(3, 3);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        let handle = grid.borrow().agents().next().unwrap();
        let held = handle.path();
        assert_eq!(agent.search_to(c(2, 2)), Err(AgentError::StateInUse));
        assert_eq!(agent.clear_goal(), Err(AgentError::StateInUse));
        assert!(held.is_empty());
        drop(held);

        let path = agent.search_to(c(2, 2)).unwrap();
        assert_eq!(*handle.path(), path);
        assert_eq!(handle.goal(), Some(c(2, 2)));
    }

    #[test]
    fn registry_tracks_live_agents() {
        let grid = shared(5, 5);
        let a = Agent::new(&grid, c(0, 0)).unwrap();
        let b = Agent::new(&grid, c(4, 4)).unwrap();
        let locations: Vec<_> = grid.borrow().agents().map(|h| h.location()).collect();
        assert_eq!(locations, vec![c(0, 0), c(4, 4)]);
        assert!(grid.borrow().agents().next().unwrap().same_agent(&a.handle()));

        drop(a);
        let left: Vec<_> = grid.borrow().agents().collect();
        assert_eq!(left.len(), 1);
        assert!(left[0].same_agent(&b.handle()));
    }

    #[test]
    fn registry_sees_latest_path() {
        let grid = shared(4, 4);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        agent.search_to(c(3, 0)).unwrap();
        let topology = grid.borrow();
        let handle = topology.agents().next().unwrap();
        assert_eq!(handle.goal(), Some(c(3, 0)));
        assert_eq!(handle.path().len(), 4);
    }

    #[test]
    fn record_traversed_marks_path() {
        let grid = shared(4, 4);
        let mut agent = Agent::new(&grid, c(0, 0)).unwrap();
        agent.search_to(c(3, 3)).unwrap();
        assert_eq!(agent.record_traversed().unwrap(), 4);
        assert_eq!(agent.record_traversed().unwrap(), 0);
        let topology = grid.borrow();
        assert!(topology.traversed().contains(&c(2, 2)));
        // Traversed cells stay passable.
        assert!(topology.is_traversable(c(2, 2)));
    }

    #[test]
    fn sequential_agents_follow_recorded_corridor() {
        let mut cfg = TopologyConfig::new(7, 3);
        cfg.allow_diagonal_moves = false;
        cfg.prefer_traversed_discount = 0.9;
        let grid = Rc::new(RefCell::new(Topology::from_config(cfg).unwrap()));

        let mut first = Agent::new(&grid, c(0, 2)).unwrap();
        first.search_to(c(6, 2)).unwrap();
        first.record_traversed().unwrap();

        let mut second = Agent::new(&grid, c(0, 0)).unwrap();
        let path = second.search_to(c(6, 0)).unwrap();
        assert!(path.contains(c(3, 2)));
        assert!(path.cost() < 6.0);
    }
}
