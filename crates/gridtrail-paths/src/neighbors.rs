use gridtrail_core::Coordinate;

const OCTILE: [Coordinate; 8] = [
    Coordinate::new(0, -1),
    Coordinate::new(1, 0),
    Coordinate::new(0, 1),
    Coordinate::new(-1, 0),
    Coordinate::new(1, -1),
    Coordinate::new(1, 1),
    Coordinate::new(-1, 1),
    Coordinate::new(-1, -1),
];

/// The set of single-step moves an agent may make.
///
/// Offsets are listed cardinal first (N, E, S, W), then diagonal
/// (NE, SE, SW, NW). Searches rely on this order being fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Moves {
    /// 4-directional moves only.
    Cardinal,
    /// Cardinal plus diagonal moves.
    #[default]
    Octile,
}

impl Moves {
    /// Pick the move set matching an `allow_diagonal_moves` flag.
    pub fn new(allow_diagonal_moves: bool) -> Self {
        if allow_diagonal_moves {
            Self::Octile
        } else {
            Self::Cardinal
        }
    }

    /// Step offsets for this move set.
    pub fn offsets(self) -> &'static [Coordinate] {
        match self {
            Self::Cardinal => &OCTILE[..4],
            Self::Octile => &OCTILE,
        }
    }

    /// Whether `from -> to` is exactly one step of this move set.
    pub fn is_step(self, from: Coordinate, to: Coordinate) -> bool {
        self.offsets().contains(&(to - from))
    }

    /// Append the single-step neighbours of `c` for which `keep` returns
    /// `true` into `buf`.
    pub fn extend_neighbors(
        self,
        c: Coordinate,
        buf: &mut Vec<Coordinate>,
        keep: impl Fn(Coordinate) -> bool,
    ) {
        for &d in self.offsets() {
            let n = c + d;
            if keep(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_per_move_set() {
        assert_eq!(Moves::Cardinal.offsets().len(), 4);
        assert_eq!(Moves::Octile.offsets().len(), 8);
        assert_eq!(Moves::new(true), Moves::Octile);
        assert_eq!(Moves::new(false), Moves::Cardinal);
    }

    #[test]
    fn cardinal_excludes_diagonals() {
        let o = Coordinate::new(2, 2);
        assert!(Moves::Cardinal.is_step(o, o.shift(0, 1)));
        assert!(!Moves::Cardinal.is_step(o, o.shift(1, 1)));
        assert!(Moves::Octile.is_step(o, o.shift(-1, -1)));
        assert!(!Moves::Octile.is_step(o, o));
        assert!(!Moves::Octile.is_step(o, o.shift(2, 0)));
    }

    #[test]
    fn extend_neighbors_filters_and_keeps_order() {
        let mut buf = Vec::new();
        Moves::Octile.extend_neighbors(Coordinate::new(0, 0), &mut buf, |c| c.x >= 0 && c.y >= 0);
        assert_eq!(
            buf,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1),
            ]
        );
    }
}
