//! Geometry primitives: [`Coordinate`] and [`Range`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// An immutable 2D integer grid position. X grows right, Y grows down.
///
/// Equality and hashing are by `(x, y)`. Whether a coordinate is a legal
/// search node depends on the topology it is used with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a coordinate shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Plain `(x, y)` tuple, handy for output.
    #[inline]
    pub const fn as_tuple(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Coordinate {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
///
/// All empty ranges are considered equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            // All empty ranges hash the same.
            Coordinate::ZERO.hash(state);
            Coordinate::ZERO.hash(state);
        } else {
            self.min.hash(state);
            self.max.hash(state);
        }
    }
}

impl Range {
    /// Create a new range from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Coordinate::new(x0.min(x1), y0.min(y1)),
            max: Coordinate::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The range covering the rectangle between two **inclusive** corners,
    /// given in any order.
    ///
    /// `from_corners((5, 2), (6, 3))` covers the four cells
    /// (5,2), (6,2), (5,3) and (6,3).
    ///
    /// The exclusive edge saturates at `i32::MAX`, so a corner on that value
    /// drops its own row or column instead of overflowing.
    #[inline]
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min: Coordinate::new(a.x.min(b.x), a.y.min(b.y)),
            max: Coordinate::new(
                a.x.max(b.x).saturating_add(1),
                a.y.max(b.y).saturating_add(1),
            ),
        }
    }

    /// Width of the range.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the range.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Coordinate) -> bool {
        c.x >= self.min.x && c.x < self.max.x && c.y >= self.min.y && c.y < self.max.y
    }

    /// Intersection of two ranges (may be empty).
    ///
    /// If the two ranges do not overlap, the zero (empty) range is returned.
    #[inline]
    pub fn intersect(self, other: Range) -> Self {
        let r = Self {
            min: Coordinate::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Coordinate::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Coordinate;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Coordinate,
}

impl Iterator for RangeIter {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Coordinate> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn coordinate_arithmetic() {
        let a = Coordinate::new(1, 2);
        let b = Coordinate::new(3, 4);
        assert_eq!(a + b, Coordinate::new(4, 6));
        assert_eq!(b - a, Coordinate::new(2, 2));
        assert_eq!(a.shift(-1, 1), Coordinate::new(0, 3));
        assert_eq!(a.as_tuple(), (1, 2));
    }

    #[test]
    fn coordinate_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(Coordinate::new(2, 3));
        set.insert(Coordinate::from((2, 3)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Coordinate::new(2, 3)));
    }

    #[test]
    fn coordinate_row_major_order() {
        let mut v = vec![
            Coordinate::new(1, 1),
            Coordinate::new(0, 1),
            Coordinate::new(5, 0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Coordinate::new(5, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1)
            ]
        );
    }

    #[test]
    fn coordinate_display() {
        assert_eq!(Coordinate::new(-3, 7).to_string(), "(-3, 7)");
    }

    #[test]
    fn range_basics() {
        let r = Range::new(0, 0, 3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(!r.is_empty());
        assert!(r.contains(Coordinate::new(0, 0)));
        assert!(r.contains(Coordinate::new(2, 1)));
        assert!(!r.contains(Coordinate::new(3, 0)));
        assert!(!r.contains(Coordinate::new(0, 2)));
        assert!(!r.contains(Coordinate::new(-1, 0)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Coordinate::new(0, 0));
        assert_eq!(r.max, Coordinate::new(3, 2));
    }

    #[test]
    fn from_corners_is_inclusive() {
        let r = Range::from_corners(Coordinate::new(6, 3), Coordinate::new(5, 2));
        assert_eq!(r, Range::new(5, 2, 7, 4));
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(
            cells,
            vec![
                Coordinate::new(5, 2),
                Coordinate::new(6, 2),
                Coordinate::new(5, 3),
                Coordinate::new(6, 3),
            ]
        );
    }

    #[test]
    fn from_corners_single_cell() {
        let c = Coordinate::new(4, 4);
        let r = Range::from_corners(c, c);
        assert_eq!(r.len(), 1);
        assert!(r.contains(c));
    }

    #[test]
    fn from_corners_saturates_at_extremes() {
        let r = Range::from_corners(Coordinate::new(2, 2), Coordinate::new(i32::MAX, 2));
        assert_eq!(r.max, Coordinate::new(i32::MAX, 3));
        let clipped = r.intersect(Range::new(0, 0, 4, 4));
        assert_eq!(clipped, Range::new(2, 2, 4, 3));

        let r = Range::from_corners(Coordinate::new(i32::MIN, 0), Coordinate::new(1, i32::MAX));
        assert!(r.contains(Coordinate::new(0, 5)));
    }

    #[test]
    fn range_iter_count_and_size_hint() {
        let r = Range::new(0, 0, 3, 2);
        let mut it = r.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(pts[0], Coordinate::new(0, 0));
        assert_eq!(pts[5], Coordinate::new(2, 1));
    }

    #[test]
    fn range_intersect() {
        let a = Range::new(0, 0, 4, 4);
        let b = Range::new(2, 2, 6, 6);
        assert_eq!(a.intersect(b), Range::new(2, 2, 4, 4));

        let far = Range::new(5, 5, 7, 7);
        let c = Range::new(0, 0, 2, 2).intersect(far);
        assert!(c.is_empty());
        assert_eq!(c, Range::default());
    }

    #[test]
    fn empty_ranges_are_equal() {
        let a = Range::new(3, 3, 3, 9);
        let b = Range::new(0, 0, 0, 0);
        assert_eq!(a, b);
        assert_eq!(a.iter().count(), 0);
    }
}
