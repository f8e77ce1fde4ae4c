//! The grid topology and its cost model.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use gridtrail_core::{Coordinate, Range};
use rand::{Rng, RngExt};

use crate::agent::{AgentHandle, AgentState};
use crate::distance::euclidean;
use crate::error::TopologyError;
use crate::neighbors::Moves;
use crate::traits::{Pather, WeightedPather};

/// Character marking an impassable cell in [`Topology::set_impassable_from_map`].
pub const IMPASSABLE_MAP_CHAR: char = 'X';

/// Upper bound on draws made by [`Topology::random_location`] before giving up.
pub const RANDOM_LOCATION_ATTEMPTS: usize = 10_000;

/// Construction parameters for a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyConfig {
    pub size_x: i32,
    pub size_y: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_allow_diagonal_moves"))]
    pub allow_diagonal_moves: bool,
    /// Multiplicative cost reduction for stepping onto a traversed cell,
    /// in `[0, 1)`. Zero disables the bias.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefer_traversed_discount: f64,
}

#[cfg(feature = "serde")]
fn default_allow_diagonal_moves() -> bool {
    true
}

impl TopologyConfig {
    /// Config for a `size_x` × `size_y` grid with diagonal moves and no
    /// traversed-cell bias.
    pub fn new(size_x: i32, size_y: i32) -> Self {
        Self {
            size_x,
            size_y,
            allow_diagonal_moves: true,
            prefer_traversed_discount: 0.0,
        }
    }
}

fn check_discount(d: f64) -> Result<f64, TopologyError> {
    if (0.0..1.0).contains(&d) {
        Ok(d)
    } else {
        Err(TopologyError::InvalidDiscount(d))
    }
}

/// A bounded 2D grid with impassable cells and a Euclidean cost model.
///
/// `impassable` together with the bounds decides which coordinates are legal
/// search nodes. `traversed` never blocks movement; it only makes stepping
/// onto those cells cheaper when a discount is configured. The discount is a
/// biasing heuristic and gives no optimality guarantee across agents.
///
/// Mutate the cell sets only between searches.
#[derive(Debug)]
pub struct Topology {
    bounds: Range,
    moves: Moves,
    prefer_traversed_discount: f64,
    impassable: HashSet<Coordinate>,
    traversed: HashSet<Coordinate>,
    agents: Vec<Weak<RefCell<AgentState>>>,
}

impl Topology {
    /// Create a `size_x` × `size_y` topology with default settings.
    pub fn new(size_x: i32, size_y: i32) -> Result<Self, TopologyError> {
        Self::from_config(TopologyConfig::new(size_x, size_y))
    }

    /// Create a topology from a validated config.
    pub fn from_config(cfg: TopologyConfig) -> Result<Self, TopologyError> {
        if cfg.size_x <= 0 || cfg.size_y <= 0 {
            return Err(TopologyError::InvalidSize {
                size_x: cfg.size_x,
                size_y: cfg.size_y,
            });
        }
        let discount = check_discount(cfg.prefer_traversed_discount)?;
        Ok(Self {
            bounds: Range::new(0, 0, cfg.size_x, cfg.size_y),
            moves: Moves::new(cfg.allow_diagonal_moves),
            prefer_traversed_discount: discount,
            impassable: HashSet::new(),
            traversed: HashSet::new(),
            agents: Vec::new(),
        })
    }

    /// The settings this topology was built with (current discount included).
    pub fn config(&self) -> TopologyConfig {
        TopologyConfig {
            size_x: self.size_x(),
            size_y: self.size_y(),
            allow_diagonal_moves: self.allow_diagonal_moves(),
            prefer_traversed_discount: self.prefer_traversed_discount,
        }
    }

    #[inline]
    pub fn size_x(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn size_y(&self) -> i32 {
        self.bounds.height()
    }

    /// The rectangle `[0, size_x) × [0, size_y)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn allow_diagonal_moves(&self) -> bool {
        self.moves == Moves::Octile
    }

    #[inline]
    pub fn moves(&self) -> Moves {
        self.moves
    }

    #[inline]
    pub fn prefer_traversed_discount(&self) -> f64 {
        self.prefer_traversed_discount
    }

    /// Change the traversed-cell discount. Must lie in `[0, 1)`.
    pub fn set_prefer_traversed_discount(&mut self, d: f64) -> Result<(), TopologyError> {
        self.prefer_traversed_discount = check_discount(d)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether `0 <= c.x < size_x` and `0 <= c.y < size_y`.
    #[inline]
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        self.bounds.contains(c)
    }

    /// Whether `c` is not impassable. Bounds are not checked.
    #[inline]
    pub fn is_traversable(&self, c: Coordinate) -> bool {
        !self.impassable.contains(&c)
    }

    /// In-bounds, traversable coordinates one step away from `c`.
    ///
    /// An impassable or off-grid cell has no outgoing edges and yields an
    /// empty set.
    pub fn neighbours(&self, c: Coordinate) -> HashSet<Coordinate> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors(c, &mut buf);
        buf.into_iter().collect()
    }

    /// Edge cost of moving from `from` to `to`.
    ///
    /// Euclidean distance, multiplied by `1 - discount` when `to` has been
    /// traversed and a discount is configured. Never negative.
    pub fn cost(&self, from: Coordinate, to: Coordinate) -> f64 {
        let mut cost = euclidean(from, to);
        if self.prefer_traversed_discount > 0.0 && self.traversed.contains(&to) {
            cost *= 1.0 - self.prefer_traversed_discount;
        }
        cost.max(0.0)
    }

    pub fn impassable(&self) -> &HashSet<Coordinate> {
        &self.impassable
    }

    pub fn traversed(&self) -> &HashSet<Coordinate> {
        &self.traversed
    }

    /// Live agents created on this topology, in creation order.
    pub fn agents(&self) -> impl Iterator<Item = AgentHandle> + '_ {
        self.agents
            .iter()
            .filter_map(Weak::upgrade)
            .map(AgentHandle::from_state)
    }

    pub(crate) fn register(&mut self, state: &Rc<RefCell<AgentState>>) {
        self.agents.retain(|w| w.strong_count() > 0);
        self.agents.push(Rc::downgrade(state));
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Mark `c` impassable. Returns `true` if it was not already.
    pub fn add_impassable(&mut self, c: Coordinate) -> bool {
        self.impassable.insert(c)
    }

    pub fn remove_impassable(&mut self, c: Coordinate) -> bool {
        self.impassable.remove(&c)
    }

    pub fn clear_impassable(&mut self) {
        self.impassable.clear();
    }

    /// Mark every cell of the inclusive rectangle between `corner1` and
    /// `corner2` impassable. Cells outside the grid are ignored.
    ///
    /// Returns the number of newly marked cells.
    pub fn set_impassable_area(&mut self, corner1: Coordinate, corner2: Coordinate) -> usize {
        let area = Range::from_corners(corner1, corner2).intersect(self.bounds);
        area.iter().filter(|&c| self.impassable.insert(c)).count()
    }

    /// Replace the impassable set from a text map.
    ///
    /// Row `y`, column `x` is impassable when it holds
    /// [`IMPASSABLE_MAP_CHAR`]. Rows may be ragged and need not cover the
    /// grid; out-of-bounds marks are ignored. Returns the number of cells
    /// marked.
    ///
    /// ```
    /// # use gridtrail_paths::{Coordinate, Topology};
    /// let mut t = Topology::new(10, 10).unwrap();
    /// t.set_impassable_from_map(&["X..X", ".X..", "..X."]);
    /// assert!(!t.is_traversable(Coordinate::new(3, 0)));
    /// ```
    pub fn set_impassable_from_map<S: AsRef<str>>(&mut self, rows: &[S]) -> usize {
        self.impassable.clear();
        let mut ignored = 0usize;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                if ch != IMPASSABLE_MAP_CHAR {
                    continue;
                }
                let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
                    ignored += 1;
                    continue;
                };
                let c = Coordinate::new(x, y);
                if self.in_bounds(c) {
                    self.impassable.insert(c);
                } else {
                    ignored += 1;
                }
            }
        }
        if ignored > 0 {
            log::debug!("map has {ignored} impassable marks outside {}", self.bounds);
        }
        self.impassable.len()
    }

    /// Record `c` as traversed by a completed search.
    pub fn add_traversed(&mut self, c: Coordinate) -> bool {
        self.traversed.insert(c)
    }

    pub fn extend_traversed(&mut self, cells: impl IntoIterator<Item = Coordinate>) {
        self.traversed.extend(cells);
    }

    pub fn clear_traversed(&mut self) {
        self.traversed.clear();
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    /// Draw a uniformly random in-bounds coordinate.
    ///
    /// Unless `allow_impassable` is set, draws are repeated until a
    /// traversable cell comes up, at most [`RANDOM_LOCATION_ATTEMPTS`]
    /// times. A grid with no traversable cell fails without drawing.
    pub fn random_location(
        &self,
        rng: &mut impl Rng,
        allow_impassable: bool,
    ) -> Result<Coordinate, TopologyError> {
        if allow_impassable {
            return Ok(self.draw(rng));
        }
        let blocked = self.impassable.iter().filter(|&&c| self.in_bounds(c)).count();
        if blocked >= self.bounds.len() {
            return Err(TopologyError::NoTraversableLocation { attempts: 0 });
        }
        for _ in 0..RANDOM_LOCATION_ATTEMPTS {
            let c = self.draw(rng);
            if self.is_traversable(c) {
                return Ok(c);
            }
        }
        Err(TopologyError::NoTraversableLocation {
            attempts: RANDOM_LOCATION_ATTEMPTS,
        })
    }
}

impl Topology {
    fn draw(&self, rng: &mut impl Rng) -> Coordinate {
        let x = rng.random_range(0..self.size_x());
        let y = rng.random_range(0..self.size_y());
        Coordinate::new(x, y)
    }
}

impl Pather for Topology {
    fn neighbors(&self, c: Coordinate, buf: &mut Vec<Coordinate>) {
        // Off-grid and impassable cells have no outgoing edges.
        if !self.in_bounds(c) || !self.is_traversable(c) {
            return;
        }
        self.moves
            .extend_neighbors(c, buf, |n| self.in_bounds(n) && self.is_traversable(n));
    }

    fn is_traversable(&self, c: Coordinate) -> bool {
        Topology::is_traversable(self, c)
    }
}

impl WeightedPather for Topology {
    fn cost(&self, from: Coordinate, to: Coordinate) -> f64 {
        Topology::cost(self, from, to)
    }
}
