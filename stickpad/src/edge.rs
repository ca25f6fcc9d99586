//! Edge detection between consecutive samples.
//!
//! There is no debounce filter: a key is sampled once per tick and every level change is an edge.
//! Mechanical bounce longer than one tick shows up as extra edges.
use crate::KEY_COUNT;
use crate::matrix::KeySnapshot;

/// A level transition
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// low -> high
    Rising,
    /// high -> low
    Falling,
}

impl Edge {
    /// Edge between two consecutive levels, `None` if the level did not change.
    pub fn between(previous: bool, current: bool) -> Option<Edge> {
        match (previous, current) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        }
    }
}

/// Per-key edges of one tick
pub type KeyEdges = [Option<Edge>; KEY_COUNT];

/// Diffs every new matrix snapshot against the previous one.
#[derive(Clone, Debug)]
pub struct EdgeDetector {
    previous: KeySnapshot,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeDetector {
    /// All keys start released.
    pub fn new() -> Self {
        Self {
            previous: [false; KEY_COUNT],
        }
    }

    /// Compute the edges against the last snapshot, then remember `current` for the next call.
    pub fn detect(&mut self, current: &KeySnapshot) -> KeyEdges {
        let mut edges = [None; KEY_COUNT];
        for (edge, (prev, curr)) in edges.iter_mut().zip(self.previous.iter().zip(current.iter())) {
            *edge = Edge::between(*prev, *curr);
        }
        self.previous = *current;
        edges
    }

    /// The snapshot the next call will be compared against
    pub fn previous(&self) -> &KeySnapshot {
        &self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(bits: u16) -> KeySnapshot {
        core::array::from_fn(|i| bits & (1 << i) != 0)
    }

    #[test]
    fn unchanged_keys_have_no_edge() {
        let mut detector = EdgeDetector::new();
        assert_eq!(detector.detect(&snapshot(0)), [None; KEY_COUNT]);
        detector.detect(&snapshot(0b101));
        assert_eq!(detector.detect(&snapshot(0b101)), [None; KEY_COUNT]);
    }

    #[test]
    fn press_and_release_are_reported_once() {
        let mut detector = EdgeDetector::new();
        let edges = detector.detect(&snapshot(0b1));
        assert_eq!(edges[0], Some(Edge::Rising));
        let edges = detector.detect(&snapshot(0b1));
        assert_eq!(edges[0], None);
        let edges = detector.detect(&snapshot(0b0));
        assert_eq!(edges[0], Some(Edge::Falling));
    }

    #[test]
    fn edge_count_equals_hamming_distance() {
        // A handful of pseudo random 12-bit patterns
        let patterns: [u16; 8] = [0x000, 0xFFF, 0xA5A, 0x5A5, 0x001, 0x800, 0x3C3, 0x3C3];
        let mut detector = EdgeDetector::new();
        let mut previous = 0u16;
        for pattern in patterns {
            let edges = detector.detect(&snapshot(pattern));
            let rising = edges.iter().filter(|e| **e == Some(Edge::Rising)).count();
            let falling = edges.iter().filter(|e| **e == Some(Edge::Falling)).count();
            assert_eq!((rising + falling) as u32, (previous ^ pattern).count_ones());
            assert_eq!(rising as u32, (!previous & pattern).count_ones());
            assert_eq!(falling as u32, (previous & !pattern & 0xFFF).count_ones());
            assert_eq!(detector.previous(), &snapshot(pattern));
            previous = pattern;
        }
    }
}
