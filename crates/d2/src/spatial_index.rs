//! Tolerance-aware point index using an R*-tree.
//!
//! Graph nodes are identified by position under the closeness tolerance.
//! Hashing raw coordinates cannot express that relation, so node lookup goes
//! through a radius query instead: a point maps to the earliest-inserted node
//! strictly within `closeness` of it.

use rstar::primitives::GeomWithData;
use rstar::RTree;
use u_takeoff_core::{Point2D, Tolerance};

/// Index of a node in insertion order.
pub type NodeId = usize;

type IndexedPoint = GeomWithData<[f64; 2], NodeId>;

/// Spatial index mapping points to node ids.
#[derive(Debug)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    points: Vec<Point2D>,
    tolerance: Tolerance,
}

impl PointIndex {
    /// Creates a new empty index.
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tree: RTree::new(),
            points: Vec::new(),
            tolerance,
        }
    }

    /// Returns the node id of the earliest node close to `p`, if any.
    pub fn find(&self, p: Point2D) -> Option<NodeId> {
        let radius = self.tolerance.closeness;
        self.tree
            .locate_within_distance(p.to_array(), radius * radius)
            .filter(|entry| self.tolerance.are_close(self.points[entry.data], p))
            .map(|entry| entry.data)
            .min()
    }

    /// Returns the node for `p`, inserting a new one if none is close.
    pub fn find_or_insert(&mut self, p: Point2D) -> NodeId {
        if let Some(id) = self.find(p) {
            return id;
        }
        let id = self.points.len();
        self.points.push(p);
        self.tree.insert(IndexedPoint::new(p.to_array(), id));
        id
    }

    /// Representative position of a node (the first point that created it).
    pub fn point(&self, id: NodeId) -> Point2D {
        self.points[id]
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_within_tolerance() {
        let mut index = PointIndex::new(Tolerance::default());
        let a = index.find_or_insert(Point2D::new(0.0, 0.0));
        let b = index.find_or_insert(Point2D::new(0.1, 0.05));
        let c = index.find_or_insert(Point2D::new(10.0, 0.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(index.len(), 2);
        assert_eq!(index.point(a), Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_boundary_distance_is_distinct() {
        let mut index = PointIndex::new(Tolerance::default());
        let a = index.find_or_insert(Point2D::new(0.0, 0.0));
        let b = index.find_or_insert(Point2D::new(0.2, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_earliest_node_wins() {
        let mut index = PointIndex::new(Tolerance::default());
        let a = index.find_or_insert(Point2D::new(0.0, 0.0));
        let b = index.find_or_insert(Point2D::new(0.3, 0.0));
        // Close to both; the earlier node is the representative.
        assert_eq!(index.find(Point2D::new(0.15, 0.0)), Some(a));
        assert_ne!(a, b);
    }

    #[test]
    fn test_find_on_empty() {
        let index = PointIndex::new(Tolerance::default());
        assert!(index.is_empty());
        assert_eq!(index.find(Point2D::new(1.0, 1.0)), None);
    }
}
