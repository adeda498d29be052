//! R-tree point index for envelope prefiltering.
//!
//! The proximity analyzer is O(centers × hospitals) over a department; the
//! index keeps the exact containment test to the candidates inside a disk's
//! bounding box, which is what makes removing the department restriction
//! feasible at the national scale.

use geo::Point;
use rstar::{RTree, RTreeObject, AABB};

/// Point with a stable positional id, indexable in an R-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub id: usize,
    pub point: Point<f64>,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x(), self.point.y()])
    }
}

/// Spatial index over point features.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load an index; ids are the positional indices of the input.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point<f64>>,
    {
        let indexed: Vec<IndexedPoint> = points
            .into_iter()
            .enumerate()
            .map(|(id, point)| IndexedPoint { id, point })
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All points whose envelope intersects the given corner-defined box.
    pub fn candidates_in(
        &self,
        lower: [f64; 2],
        upper: [f64; 2],
    ) -> impl Iterator<Item = &IndexedPoint> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_corners(lower, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_in_envelope() {
        let index = PointIndex::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(index.len(), 3);

        let ids: Vec<usize> = index.candidates_in([-1.0, -1.0], [6.0, 6.0]).map(|p| p.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&0));
        assert!(ids.contains(&1));
    }

    #[test]
    fn test_empty_index() {
        let index = PointIndex::from_points(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.candidates_in([0.0, 0.0], [1.0, 1.0]).count(), 0);
    }
}
