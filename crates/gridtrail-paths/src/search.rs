//! Uniform-cost search (Dijkstra variant with early exit).

use std::collections::{HashMap, HashSet};

use gridtrail_core::Coordinate;

use crate::frontier::Frontier;
use crate::traits::WeightedPather;

/// Back-pointer recorded for every reached coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predecessor {
    /// The search root; it has no parent.
    Root,
    /// Reached by one step from this coordinate.
    Parent(Coordinate),
}

/// Exploration state owned by a single search call.
///
/// Costs are relaxed lazily, so entries in `cost_so_far` can decrease after
/// insertion until the coordinate is popped for good.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    cost_so_far: HashMap<Coordinate, f64>,
    came_from: HashMap<Coordinate, Predecessor>,
}

impl SearchState {
    /// State seeded with `start` as the root at cost 0.
    pub fn new(start: Coordinate) -> Self {
        let mut state = Self::default();
        state.cost_so_far.insert(start, 0.0);
        state.came_from.insert(start, Predecessor::Root);
        state
    }

    /// Best cost recorded so far for `c`.
    pub fn cost_to(&self, c: Coordinate) -> Option<f64> {
        self.cost_so_far.get(&c).copied()
    }

    pub fn predecessor(&self, c: Coordinate) -> Option<Predecessor> {
        self.came_from.get(&c).copied()
    }

    /// Whether `c` has ever been reached.
    pub fn reached(&self, c: Coordinate) -> bool {
        self.came_from.contains_key(&c)
    }

    /// Number of reached coordinates.
    pub fn len(&self) -> usize {
        self.came_from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.came_from.is_empty()
    }

    /// Record `to` at `cost` via `from` if that is new or cheaper.
    fn relax(&mut self, from: Coordinate, to: Coordinate, cost: f64) -> bool {
        let improves = match self.cost_so_far.get(&to) {
            Some(&known) => cost < known,
            None => true,
        };
        if improves {
            self.cost_so_far.insert(to, cost);
            self.came_from.insert(to, Predecessor::Parent(from));
        }
        improves
    }

    /// Walk the back-pointers from `goal` to the root, returning the steps in
    /// start-to-goal order. `None` when `goal` was never reached.
    ///
    /// # Panics
    ///
    /// If the back-pointer chain of a reached goal is broken. That can only
    /// result from a relaxation defect.
    pub fn reconstruct(&self, goal: Coordinate) -> Option<Vec<Coordinate>> {
        if !self.reached(goal) {
            return None;
        }
        let mut steps = vec![goal];
        let mut cur = goal;
        loop {
            match self.came_from.get(&cur) {
                Some(Predecessor::Root) => break,
                Some(&Predecessor::Parent(p)) => {
                    steps.push(p);
                    cur = p;
                }
                None => unreachable!("back-pointer chain broken at {cur}"),
            }
            if steps.len() > self.came_from.len() {
                unreachable!("back-pointer cycle through {cur}");
            }
        }
        steps.reverse();
        Some(steps)
    }
}

/// An ordered path from start to goal, with its total cost.
///
/// An empty path means no route exists.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<Coordinate>,
    cost: f64,
}

impl Path {
    pub(crate) fn new(steps: Vec<Coordinate>, cost: f64) -> Self {
        Self { steps, cost }
    }

    /// Steps in start-to-goal order, both endpoints included.
    pub fn steps(&self) -> &[Coordinate] {
        &self.steps
    }

    /// Sum of edge costs along the path. Zero for empty and single-cell paths.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.steps.first().copied()
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.steps.last().copied()
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        self.steps.contains(&c)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.steps.iter()
    }

    /// The cells on the path, without order.
    pub fn to_set(&self) -> HashSet<Coordinate> {
        self.steps.iter().copied().collect()
    }

    pub fn into_steps(self) -> Vec<Coordinate> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Coordinates popped and expanded.
    pub expanded: usize,
    /// Outdated frontier entries discarded on pop.
    pub stale: usize,
    /// Entries pushed onto the frontier, the root included.
    pub pushed: usize,
}

/// Find the cheapest path from `start` to `goal`.
///
/// Returns `[start]` when both are equal, and an empty path when either
/// endpoint is impassable or the goal cannot be reached. Runs to completion
/// without yielding. Equal-cost choices are resolved the same way on every
/// call.
pub fn uniform_cost_search<P: WeightedPather>(
    pather: &P,
    start: Coordinate,
    goal: Coordinate,
) -> Path {
    search_with_stats(pather, start, goal).0
}

/// [`uniform_cost_search`] that also reports [`SearchStats`].
pub fn search_with_stats<P: WeightedPather>(
    pather: &P,
    start: Coordinate,
    goal: Coordinate,
) -> (Path, SearchStats) {
    let mut stats = SearchStats::default();

    if start == goal {
        return (Path::new(vec![start], 0.0), stats);
    }
    if !pather.is_traversable(start) || !pather.is_traversable(goal) {
        log::debug!("search {start} -> {goal}: endpoint impassable");
        return (Path::default(), stats);
    }

    let mut state = SearchState::new(start);
    let mut frontier = Frontier::new();
    frontier.put(0.0, start);
    stats.pushed = 1;

    let mut nbuf = Vec::with_capacity(8);

    while let Some(entry) = frontier.pop_min_entry() {
        let current = entry.coordinate;
        let current_cost = state.cost_to(current).unwrap_or(f64::INFINITY);

        // Skip stale entries.
        if entry.priority > current_cost {
            stats.stale += 1;
            continue;
        }

        if current == goal {
            break;
        }
        stats.expanded += 1;

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &next in nbuf.iter() {
            let candidate = current_cost + pather.cost(current, next);
            if state.relax(current, next, candidate) {
                log::trace!("relax {next} via {current}: {candidate:.3}");
                frontier.put(candidate, next);
                stats.pushed += 1;
            }
        }
    }

    let path = match state.reconstruct(goal) {
        Some(steps) => Path::new(steps, state.cost_to(goal).unwrap_or_default()),
        None => Path::default(),
    };

    log::debug!(
        "search {start} -> {goal}: {} steps, cost {:.3}, expanded {}, stale {}, pushed {}",
        path.len(),
        path.cost(),
        stats.expanded,
        stats.stale,
        stats.pushed,
    );

    (path, stats)
}
