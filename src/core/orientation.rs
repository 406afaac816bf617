//! Cardinal orientation with 90° turn algebra.

use serde::{Deserialize, Serialize};

/// One of the four cardinal headings, cyclic under 90° turns.
///
/// The world frame is screen-oriented: X grows east, Y grows south, so
/// `North` points toward −Y. The derived total order (N < E < S < W)
/// makes the type usable as a lookup key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Orientation {
    /// Toward −Y.
    #[default]
    North,
    /// Toward +X.
    East,
    /// Toward +Y.
    South,
    /// Toward −X.
    West,
}

impl Orientation {
    /// All orientations in cycle order.
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Stable index for fixed-size per-direction tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading after one 90° right turn.
    #[inline]
    pub fn turn_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Heading after one 90° left turn.
    #[inline]
    pub fn turn_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Opposite heading (two right turns).
    #[inline]
    pub fn turn_back(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Unit vector for dead reckoning, in the (east, south) frame.
    #[inline]
    pub fn unit(self) -> (f32, f32) {
        match self {
            Orientation::North => (0.0, -1.0),
            Orientation::East => (1.0, 0.0),
            Orientation::South => (0.0, 1.0),
            Orientation::West => (-1.0, 0.0),
        }
    }

    /// Number of right 90° pivots to reach `target` (0..=3).
    #[inline]
    pub fn right_turns_to(self, target: Self) -> usize {
        (target.index() + 4 - self.index()) % 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_turn_cycle() {
        let mut o = Orientation::North;
        let expected = [
            Orientation::East,
            Orientation::South,
            Orientation::West,
            Orientation::North,
        ];
        for e in expected {
            o = o.turn_right();
            assert_eq!(o, e);
        }
    }

    #[test]
    fn test_left_inverse_of_right() {
        for o in Orientation::ALL {
            assert_eq!(o.turn_right().turn_left(), o);
            assert_eq!(o.turn_left().turn_right(), o);
        }
    }

    #[test]
    fn test_back_is_two_rights() {
        for o in Orientation::ALL {
            assert_eq!(o.turn_back(), o.turn_right().turn_right());
            assert_eq!(o.turn_back().turn_back(), o);
        }
    }

    #[test]
    fn test_unit_vectors_cancel() {
        for o in Orientation::ALL {
            let (x, y) = o.unit();
            let (bx, by) = o.turn_back().unit();
            assert_eq!(x + bx, 0.0);
            assert_eq!(y + by, 0.0);
        }
    }

    #[test]
    fn test_right_turns_to() {
        assert_eq!(Orientation::North.right_turns_to(Orientation::North), 0);
        assert_eq!(Orientation::North.right_turns_to(Orientation::East), 1);
        assert_eq!(Orientation::North.right_turns_to(Orientation::South), 2);
        assert_eq!(Orientation::North.right_turns_to(Orientation::West), 3);
        assert_eq!(Orientation::West.right_turns_to(Orientation::North), 1);
    }
}
