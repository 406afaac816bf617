//! Junction node and per-exit exploration flags.

use serde::{Deserialize, Serialize};

use crate::core::{Orientation, Position};

/// Per-direction exit record for one junction.
///
/// A fixed four-slot table indexed by [`Orientation`]:
///
/// - absent — no exit detected in that direction yet
/// - `Some(false)` — exit detected, not yet departed through
/// - `Some(true)` — the robot has departed through this exit
///
/// Entries are added lazily as sensors detect openings and only ever
/// progress from absent to unexplored to explored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitMap {
    slots: [Option<bool>; 4],
}

impl ExitMap {
    /// Empty map: nothing detected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an exit exists in `dir`, if not already known.
    ///
    /// Returns true if the exit is (still) unexplored.
    pub fn discover(&mut self, dir: Orientation) -> bool {
        let slot = &mut self.slots[dir.index()];
        match *slot {
            None => {
                *slot = Some(false);
                true
            }
            Some(explored) => !explored,
        }
    }

    /// Mark the exit in `dir` as departed-through, recording it first if
    /// it was never detected.
    pub fn mark_explored(&mut self, dir: Orientation) {
        self.slots[dir.index()] = Some(true);
    }

    /// Whether an exit is known in `dir`.
    #[inline]
    pub fn is_known(&self, dir: Orientation) -> bool {
        self.slots[dir.index()].is_some()
    }

    /// Whether the exit in `dir` has been departed through.
    #[inline]
    pub fn is_explored(&self, dir: Orientation) -> bool {
        self.slots[dir.index()] == Some(true)
    }

    /// Whether any detected exit is still unexplored.
    pub fn has_unexplored(&self) -> bool {
        self.slots.iter().any(|s| *s == Some(false))
    }
}

/// One discovered grid intersection.
///
/// Equality is positional (tolerant on both axes) and independent of the
/// exit map: the same junction reached from a different direction, with a
/// slightly different odometry estimate, resolves to the same node.
///
/// Junctions are created the first time the robot halts at an unseen
/// position, mutated as exits are discovered and traversed, and never
/// deleted — the map only grows.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Junction {
    position: Position,
    exits: ExitMap,
}

impl Junction {
    /// Create a junction at `position` with no exits detected.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            exits: ExitMap::new(),
        }
    }

    /// Position of this junction.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Exit record.
    #[inline]
    pub fn exits(&self) -> &ExitMap {
        &self.exits
    }

    /// Mutable exit record.
    #[inline]
    pub fn exits_mut(&mut self) -> &mut ExitMap {
        &mut self.exits
    }
}

impl PartialEq for Junction {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;

    #[test]
    fn test_exit_map_lifecycle() {
        let mut exits = ExitMap::new();
        assert!(!exits.is_known(Orientation::North));
        assert!(!exits.has_unexplored());

        // First detection: unexplored.
        assert!(exits.discover(Orientation::North));
        assert!(exits.is_known(Orientation::North));
        assert!(!exits.is_explored(Orientation::North));
        assert!(exits.has_unexplored());

        // Re-detection does not reset anything.
        assert!(exits.discover(Orientation::North));

        exits.mark_explored(Orientation::North);
        assert!(exits.is_explored(Orientation::North));
        assert!(!exits.discover(Orientation::North));
        assert!(!exits.has_unexplored());
    }

    #[test]
    fn test_mark_explored_without_discovery() {
        let mut exits = ExitMap::new();
        exits.mark_explored(Orientation::South);
        assert!(exits.is_known(Orientation::South));
        assert!(exits.is_explored(Orientation::South));
    }

    #[test]
    fn test_junction_equality_is_positional() {
        Coord::set_tolerance(50.0);
        let a = Junction::new(Position::new(1000.0, 1000.0));
        let mut b = Junction::new(Position::new(1020.0, 990.0));
        b.exits_mut().discover(Orientation::East);
        assert_eq!(a, b);

        let c = Junction::new(Position::new(1100.0, 1000.0));
        assert_ne!(a, c);
    }
}
