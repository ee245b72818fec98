//! Closed loop enumeration.
//!
//! Every node of the [`PlanarGraph`] is used as a DFS root. A path of
//! distinct nodes that reaches back to its root after at least three points
//! is a candidate piece boundary. The same geometric cycle is found once per
//! starting node and once per direction; [`canonical_key`] collapses these.
//!
//! The search is intentionally broad: it also returns cycles that are valid
//! topologically but are not manufacturing pieces (for example a cutout path
//! plus part of the outer boundary). Those are discarded later by scribe
//! assignment and area-minimal selection, which have information the graph
//! does not.

use std::collections::HashSet;

use u_takeoff_core::{Point2D, SearchConfig};

use crate::graph::PlanarGraph;
use crate::spatial_index::NodeId;

/// A closed loop; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    nodes: Vec<NodeId>,
    points: Vec<Point2D>,
}

impl Loop {
    /// Node ids in traversal order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Vertex positions in traversal order.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the loop has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive node pairs, including the closing pair.
    pub fn node_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| (self.nodes[i], self.nodes[(i + 1) % n]))
    }
}

/// Output of [`enumerate_loops`].
#[derive(Debug, Clone, Default)]
pub struct LoopSet {
    /// Distinct loops in discovery order.
    pub loops: Vec<Loop>,
    /// Cycles closed before deduplication.
    pub cycles_found: usize,
    /// True if the path budget stopped the search early.
    pub truncated: bool,
}

/// Canonical, rotation- and reflection-invariant key of a point sequence.
///
/// Points are rounded to `precision` decimals; the key is the smaller of the
/// minimal rotation of the sequence and the minimal rotation of its reverse.
pub fn canonical_key(points: &[Point2D], precision: usize) -> String {
    let rounded: Vec<String> = points
        .iter()
        .map(|p| format!("{:.*},{:.*}", precision, p.x, precision, p.y))
        .collect();

    let forward = min_rotation(&rounded);
    let mut reversed = rounded;
    reversed.reverse();
    let backward = min_rotation(&reversed);

    if backward < forward {
        backward
    } else {
        forward
    }
}

/// Lexicographically smallest `|`-joined rotation.
fn min_rotation(parts: &[String]) -> String {
    let n = parts.len();
    let mut best: Option<String> = None;
    for start in 0..n {
        let key = parts[start..]
            .iter()
            .chain(parts[..start].iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|");
        if best.as_ref().map_or(true, |current| key < *current) {
            best = Some(key);
        }
    }
    best.unwrap_or_default()
}

/// Mutable state shared by the DFS frames of one enumeration.
struct Search<'a> {
    graph: &'a PlanarGraph,
    config: &'a SearchConfig,
    seen: HashSet<String>,
    result: LoopSet,
    frames: u64,
}

impl Search<'_> {
    fn budget_exhausted(&mut self) -> bool {
        if let Some(limit) = self.config.max_paths {
            if self.frames >= limit {
                self.result.truncated = true;
                return true;
            }
        }
        false
    }

    fn visit(&mut self, current: NodeId, root: NodeId, path: &mut Vec<NodeId>) {
        if path.len() > self.config.max_depth || self.budget_exhausted() {
            return;
        }
        self.frames += 1;

        for &neighbor in self.graph.neighbors(current) {
            if neighbor == root && path.len() >= 3 {
                self.record(path);
                // The closing edge ends this branch.
                return;
            }

            if !path.contains(&neighbor) {
                path.push(neighbor);
                self.visit(neighbor, root, path);
                path.pop();
            }

            if self.result.truncated {
                return;
            }
        }
    }

    fn record(&mut self, path: &[NodeId]) {
        self.result.cycles_found += 1;
        let points: Vec<Point2D> = path.iter().map(|&id| self.graph.point(id)).collect();
        let key = canonical_key(&points, self.config.key_precision);
        if self.seen.insert(key) {
            self.result.loops.push(Loop {
                nodes: path.to_vec(),
                points,
            });
        }
    }
}

/// Enumerates every distinct simple cycle of up to `max_depth` points.
pub fn enumerate_loops(graph: &PlanarGraph, config: &SearchConfig) -> LoopSet {
    let mut search = Search {
        graph,
        config,
        seen: HashSet::new(),
        result: LoopSet::default(),
        frames: 0,
    };

    for root in graph.node_ids() {
        let mut path = vec![root];
        search.visit(root, root, &mut path);
        if search.result.truncated {
            log::warn!(
                "Loop search stopped after {} paths; results are partial",
                search.frames
            );
            break;
        }
    }

    search.result
}
