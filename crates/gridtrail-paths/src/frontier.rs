use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridtrail_core::Coordinate;

/// A queued `(priority, coordinate)` pair, ordered by priority only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    pub priority: f64,
    pub coordinate: Coordinate,
}

/// Heap slot: an entry plus its insertion sequence number for tie-breaks.
#[derive(Clone, Copy)]
struct Slot {
    entry: FrontierEntry,
    seq: u64,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first,
        // earliest insertion first among equals.
        other
            .entry
            .priority
            .total_cmp(&self.entry.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered queue of coordinates awaiting exploration.
///
/// There is no decrease-key: pushing a coordinate that is already queued
/// simply adds a second entry. Consumers discard stale entries when they pop
/// them.
#[derive(Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Slot>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coordinate` at `priority`. Never deduplicates.
    pub fn put(&mut self, priority: f64, coordinate: Coordinate) {
        self.heap.push(Slot {
            entry: FrontierEntry {
                priority,
                coordinate,
            },
            seq: self.seq,
        });
        self.seq = self.seq.wrapping_add(1);
    }

    /// Remove and return the lowest-priority coordinate, or `None` when empty.
    pub fn pop_min(&mut self) -> Option<Coordinate> {
        self.pop_min_entry().map(|e| e.coordinate)
    }

    /// Like [`pop_min`](Self::pop_min) but keeps the priority it was queued at.
    pub fn pop_min_entry(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|s| s.entry)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn pops_in_priority_order() {
        let mut f = Frontier::new();
        f.put(3.0, c(3, 0));
        f.put(0.5, c(0, 0));
        f.put(2.0, c(2, 0));
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop_min(), Some(c(0, 0)));
        assert_eq!(f.pop_min(), Some(c(2, 0)));
        assert_eq!(f.pop_min(), Some(c(3, 0)));
        assert!(f.is_empty());
        assert_eq!(f.pop_min(), None);
    }

    #[test]
    fn keeps_duplicate_coordinates() {
        let mut f = Frontier::new();
        f.put(5.0, c(1, 1));
        f.put(1.0, c(1, 1));
        assert_eq!(f.len(), 2);
        let first = f.pop_min_entry().unwrap();
        assert_eq!(first.priority, 1.0);
        assert_eq!(first.coordinate, c(1, 1));
        let stale = f.pop_min_entry().unwrap();
        assert_eq!(stale.priority, 5.0);
        assert!(f.is_empty());
    }

    #[test]
    fn equal_priorities_pop_first_in_first_out() {
        let mut f = Frontier::new();
        f.put(1.0, c(9, 9));
        f.put(1.0, c(1, 1));
        f.put(1.0, c(5, 5));
        assert_eq!(f.pop_min(), Some(c(9, 9)));
        assert_eq!(f.pop_min(), Some(c(1, 1)));
        assert_eq!(f.pop_min(), Some(c(5, 5)));
    }

    #[test]
    fn irrational_priorities_order_correctly() {
        let mut f = Frontier::new();
        f.put(2.0, c(0, 2));
        f.put(std::f64::consts::SQRT_2, c(1, 1));
        f.put(1.0, c(1, 0));
        let order: Vec<_> = std::iter::from_fn(|| f.pop_min()).collect();
        assert_eq!(order, vec![c(1, 0), c(1, 1), c(0, 2)]);
    }

    #[test]
    fn clear_empties_queue() {
        let mut f = Frontier::new();
        f.put(1.0, c(0, 0));
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.pop_min_entry(), None);
    }
}
