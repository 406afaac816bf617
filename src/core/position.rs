//! Tolerant 2D position.

use serde::{Deserialize, Serialize};

use super::{Coord, Orientation};

/// A dead-reckoned position in the maze, compared within the calibrated
/// tolerance band on both axes.
///
/// Positions drift as the robot moves; the band (half the corridor width)
/// is wide enough that a revisited junction compares equal to its stored
/// node and narrow enough that adjacent junctions stay distinct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// East-axis coordinate.
    pub x: Coord,
    /// South-axis coordinate.
    pub y: Coord,
}

impl Position {
    /// Create a position from raw values.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: Coord::new(x),
            y: Coord::new(y),
        }
    }

    /// Origin.
    pub const ORIGIN: Position = Position {
        x: Coord::new(0.0),
        y: Coord::new(0.0),
    };

    /// Position after travelling `dist` along `heading`.
    #[inline]
    pub fn offset(self, heading: Orientation, dist: f32) -> Self {
        let (ux, uy) = heading.unit();
        Self {
            x: self.x + ux * dist,
            y: self.y + uy * dist,
        }
    }

    /// Advance this position in place along `heading`.
    #[inline]
    pub fn advance(&mut self, heading: Orientation, dist: f32) {
        let (ux, uy) = heading.unit();
        self.x += ux * dist;
        self.y += uy * dist;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tolerance is crate-global; all unit tests share the 50.0 band.
    fn tol() {
        Coord::set_tolerance(50.0);
    }

    #[test]
    fn test_offset_by_heading() {
        tol();
        let p = Position::new(1000.0, 1000.0);
        let d = 200.0;
        assert_eq!(p.offset(Orientation::North, d), Position::new(1000.0, 800.0));
        assert_eq!(p.offset(Orientation::East, d), Position::new(1200.0, 1000.0));
        assert_eq!(p.offset(Orientation::South, d), Position::new(1000.0, 1200.0));
        assert_eq!(p.offset(Orientation::West, d), Position::new(800.0, 1000.0));
    }

    #[test]
    fn test_tolerant_equality_per_axis() {
        tol();
        let p = Position::new(1000.0, 1000.0);
        assert_eq!(p, Position::new(1030.0, 980.0));
        assert_ne!(p, Position::new(1030.0, 940.0));
        assert_ne!(p, Position::new(1100.0, 1000.0));
    }

    #[test]
    fn test_advance_accumulates() {
        tol();
        let mut p = Position::new(0.0, 0.0);
        for _ in 0..10 {
            p.advance(Orientation::East, 10.0);
        }
        assert_eq!(p, Position::new(100.0, 0.0));
    }
}
