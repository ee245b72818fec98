//! Planar graph built from boundary segments.
//!
//! Segment endpoints are merged into nodes under the closeness tolerance
//! (via [`PointIndex`]). The graph is undirected: each segment adds each
//! endpoint to the other's neighbour list. Parallel duplicate segments add
//! duplicate neighbour entries; the loop enumerator's canonical keys absorb
//! the resulting duplicate cycles.

use std::collections::HashMap;

use u_takeoff_core::{Point2D, Tolerance};

use crate::primitives::Segment;
use crate::spatial_index::{NodeId, PointIndex};

/// Order-independent key for an edge between two nodes.
#[inline]
pub fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Undirected adjacency graph over tolerance-merged points.
#[derive(Debug)]
pub struct PlanarGraph {
    nodes: PointIndex,
    adjacency: Vec<Vec<NodeId>>,
    /// Layer of the last segment seen on each edge.
    edge_layers: HashMap<(NodeId, NodeId), String>,
    /// Index of the first segment seen on each edge.
    edge_segments: HashMap<(NodeId, NodeId), usize>,
}

impl PlanarGraph {
    /// Builds the graph from segments. Never fails; empty input gives an
    /// empty graph.
    pub fn build(segments: &[Segment], tolerance: Tolerance) -> Self {
        let mut nodes = PointIndex::new(tolerance);
        let mut adjacency: Vec<Vec<NodeId>> = Vec::new();
        let mut edge_layers = HashMap::with_capacity(segments.len());
        let mut edge_segments = HashMap::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let a = nodes.find_or_insert(segment.start);
            let b = nodes.find_or_insert(segment.end);
            if adjacency.len() < nodes.len() {
                adjacency.resize_with(nodes.len(), Vec::new);
            }

            adjacency[a].push(b);
            adjacency[b].push(a);

            let key = edge_key(a, b);
            edge_layers.insert(key, segment.layer.clone());
            edge_segments.entry(key).or_insert(index);
        }

        Self {
            nodes,
            adjacency,
            edge_layers,
            edge_segments,
        }
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (unordered) edges.
    pub fn edge_count(&self) -> usize {
        self.edge_segments.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    /// Neighbours of a node in discovery order (may contain repeats).
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id]
    }

    /// Position of a node.
    pub fn point(&self, id: NodeId) -> Point2D {
        self.nodes.point(id)
    }

    /// Node close to `p`, if any.
    pub fn node_at(&self, p: Point2D) -> Option<NodeId> {
        self.nodes.find(p)
    }

    /// Layer attributed to the edge between two nodes, in either order.
    pub fn edge_layer(&self, a: NodeId, b: NodeId) -> Option<&str> {
        self.edge_layers.get(&edge_key(a, b)).map(String::as_str)
    }

    /// Index (into the build input) of the first segment on an edge.
    pub fn edge_segment(&self, a: NodeId, b: NodeId) -> Option<usize> {
        self.edge_segments.get(&edge_key(a, b)).copied()
    }
}
