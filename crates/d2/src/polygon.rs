//! Polygons assembled from enumerated loops.

use std::collections::HashMap;

use u_takeoff_core::{Bounds2D, Point2D, Tolerance};

use crate::geometry::{approximate_circle, is_contained, ring_area, ring_edges, ring_perimeter};
use crate::graph::PlanarGraph;
use crate::loops::Loop;
use crate::primitives::Segment;

/// One boundary edge of a polygon and the segment it came from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonEdge {
    pub start: Point2D,
    pub end: Point2D,
    /// Originating segment. `None` for synthetic edges (drill-hole outlines)
    /// and for edges with no matching segment.
    pub segment: Option<Segment>,
}

impl PolygonEdge {
    /// Layer of the originating segment.
    pub fn layer(&self) -> Option<&str> {
        self.segment.as_ref().map(|s| s.layer.as_str())
    }
}

/// A closed polygon with its nested holes and drill holes.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Point2D>,
    pub bounds: Bounds2D,
    /// Unsigned area in drawing units.
    pub area: f64,
    pub edges: Vec<PolygonEdge>,
    pub holes: Vec<Polygon>,
    pub drill_holes: Vec<Polygon>,
    pub scribe: Option<String>,
    /// Dominant layer of the boundary, or the entity layer for drill holes.
    pub source_layer: Option<String>,
}

impl Polygon {
    /// Creates a polygon from a ring with unattributed edges.
    pub fn from_points(points: Vec<Point2D>) -> Self {
        let edges = ring_edges(&points)
            .map(|(start, end)| PolygonEdge {
                start,
                end,
                segment: None,
            })
            .collect();
        Self::with_edges(points, edges)
    }

    /// Creates a polygon from a loop, attributing each edge to the first
    /// segment the graph recorded between its two nodes.
    pub fn from_loop(found: &Loop, graph: &PlanarGraph, segments: &[Segment]) -> Self {
        let points = found.points().to_vec();
        let edges = found
            .node_edges()
            .map(|(a, b)| PolygonEdge {
                start: graph.point(a),
                end: graph.point(b),
                segment: graph
                    .edge_segment(a, b)
                    .and_then(|index| segments.get(index))
                    .cloned(),
            })
            .collect();

        let mut polygon = Self::with_edges(points, edges);
        polygon.source_layer = polygon.dominant_layer();
        polygon
    }

    /// Regular `segments`-gon approximating a drill hole.
    pub fn drill_hole(center: Point2D, radius: f64, segments: usize, layer: &str) -> Self {
        let mut polygon = Self::from_points(approximate_circle(center, radius, segments));
        polygon.source_layer = Some(layer.to_string());
        polygon
    }

    fn with_edges(points: Vec<Point2D>, edges: Vec<PolygonEdge>) -> Self {
        Self {
            bounds: Bounds2D::from_points(&points),
            area: ring_area(&points),
            points,
            edges,
            holes: Vec::new(),
            drill_holes: Vec::new(),
            scribe: None,
            source_layer: None,
        }
    }

    /// Layers of the attributed boundary edges, one entry per edge.
    pub fn edge_layers(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().filter_map(PolygonEdge::layer)
    }

    /// Most frequent boundary layer; ties go to the layer seen first.
    fn dominant_layer(&self) -> Option<String> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for layer in self.edge_layers() {
            let count = counts.entry(layer).or_insert(0);
            if *count == 0 {
                order.push(layer);
            }
            *count += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for layer in order {
            let count = counts[layer];
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((layer, count));
            }
        }
        best.map(|(layer, _)| layer.to_string())
    }

    /// Closed perimeter length.
    pub fn perimeter(&self) -> f64 {
        ring_perimeter(&self.points)
    }

    /// Returns true if `other` lies strictly inside this polygon with no
    /// shared edge.
    pub fn contains(&self, other: &Polygon, tolerance: &Tolerance) -> bool {
        is_contained(&other.points, &self.points, tolerance)
    }
}

/// Builds polygons from loops, ordered by descending area.
///
/// The sort is stable, so equal-area polygons keep discovery order.
pub fn assemble_polygons(loops: &[Loop], graph: &PlanarGraph, segments: &[Segment]) -> Vec<Polygon> {
    let mut polygons: Vec<Polygon> = loops
        .iter()
        .map(|found| Polygon::from_loop(found, graph, segments))
        .collect();
    polygons.sort_by(|a, b| b.area.total_cmp(&a.area));
    polygons
}
