use gridtrail_core::Coordinate;

/// Minimal path-finding interface — neighbour enumeration and passability.
pub trait Pather {
    /// Append neighbours of `c` into `buf`. The caller clears `buf` before calling.
    ///
    /// The order must be stable across calls for searches to be repeatable.
    fn neighbors(&self, c: Coordinate, buf: &mut Vec<Coordinate>);

    /// Whether `c` may take part in a path at all.
    fn is_traversable(&self, c: Coordinate) -> bool;
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn cost(&self, from: Coordinate, to: Coordinate) -> f64;
}
