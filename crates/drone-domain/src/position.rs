//! Planar coordinates used for drone and delivery locations.

use serde::{Deserialize, Serialize};

/// A point on the planning grid.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `to`, progress clamped to `[0, 1]`
    #[must_use]
    pub fn interpolate(&self, to: &Self, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);

        Self {
            x: self.x + (to.x - self.x) * progress,
            y: self.y + (to.y - self.y) * progress,
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (f64, f64) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(&a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interpolate_clamps_progress() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, -10.0);

        assert_eq!(a.interpolate(&b, 0.5), Position::new(5.0, -5.0));
        assert_eq!(a.interpolate(&b, 2.0), b);
        assert_eq!(a.interpolate(&b, -1.0), a);
    }

    #[test]
    fn test_serializes_as_pair() {
        let json = serde_json::to_string(&Position::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let back: Position = serde_json::from_str("[3.0,4.0]").unwrap();
        assert_eq!(back, Position::new(3.0, 4.0));
    }
}
