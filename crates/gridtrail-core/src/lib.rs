//! **gridtrail-core** — geometry primitives for the *gridtrail* path-finding
//! workspace.
//!
//! [`Coordinate`] is the value type every search node, impassable cell and
//! path step is expressed in. [`Range`] describes rectangular areas such as
//! a topology's bounds or a block of walls.

pub mod geom;

pub use geom::{Coordinate, Range, RangeIter};
