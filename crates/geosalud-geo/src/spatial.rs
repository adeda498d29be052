//! Degree-space disk containment.

use crate::distance::BufferRadius;
use geo::{Distance, Euclidean, Point};

/// Planar disk in degree space around a center point.
///
/// Containment is strict: a point exactly on the boundary is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeDisk {
    center: Point<f64>,
    radius_deg: f64,
}

impl DegreeDisk {
    pub fn new(center: Point<f64>, radius: BufferRadius) -> Self {
        Self {
            center,
            radius_deg: radius.to_degrees(),
        }
    }

    pub fn radius_degrees(&self) -> f64 {
        self.radius_deg
    }

    /// Whether a point lies strictly within the disk.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        Euclidean.distance(self.center, *point) < self.radius_deg
    }

    /// Axis-aligned bounding box of the disk, as lower/upper corners.
    pub fn envelope(&self) -> ([f64; 2], [f64; 2]) {
        let (x, y) = (self.center.x(), self.center.y());
        (
            [x - self.radius_deg, y - self.radius_deg],
            [x + self.radius_deg, y + self.radius_deg],
        )
    }
}
