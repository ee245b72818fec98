//! Drill-hole detection from circle and arc candidates.

use u_takeoff_core::TakeoffConfig;

use crate::polygon::Polygon;
use crate::primitives::DrillCandidate;

/// Turns full-circle candidates into polygons.
///
/// Arcs shorter than `full_circle_sweep` degrees are skipped. Each drill
/// hole keeps the candidate's layer as its source layer.
pub fn detect_drill_holes(candidates: &[DrillCandidate], config: &TakeoffConfig) -> Vec<Polygon> {
    candidates
        .iter()
        .filter(|c| config.layers.is_drill(&c.layer))
        .filter(|c| c.is_full_circle(config.full_circle_sweep))
        .map(|c| Polygon::drill_hole(c.center, c.radius, config.circle_segments, &c.layer))
        .collect()
}
