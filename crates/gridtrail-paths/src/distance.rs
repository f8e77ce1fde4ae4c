use gridtrail_core::Coordinate;

/// Euclidean (L2) distance between two coordinates.
///
/// `1.0` for a cardinal step and `√2` for a diagonal one.
#[inline]
pub fn euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}
