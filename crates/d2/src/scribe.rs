//! Scribe (piece name) assignment.

use u_takeoff_core::Point2D;

use crate::geometry::{is_point_near_ring, point_in_polygon, vertex_centroid};
use crate::polygon::Polygon;
use crate::primitives::TextLabel;

/// Picks the label for one polygon.
///
/// Labels inside the polygon take precedence; otherwise labels within
/// `edge_proximity` of any edge are considered. Among the candidates the one
/// nearest the vertex centroid wins, ties going to the earlier label.
pub fn find_scribe<'a>(
    polygon: &Polygon,
    labels: &'a [TextLabel],
    edge_proximity: f64,
) -> Option<&'a TextLabel> {
    let centroid = vertex_centroid(&polygon.points);

    let inside = labels
        .iter()
        .filter(|label| point_in_polygon(label.position, &polygon.points));
    if let Some(label) = nearest(inside, centroid) {
        return Some(label);
    }

    let near_edge = labels
        .iter()
        .filter(|label| is_point_near_ring(label.position, &polygon.points, edge_proximity));
    nearest(near_edge, centroid)
}

fn nearest<'a>(
    candidates: impl Iterator<Item = &'a TextLabel>,
    target: Point2D,
) -> Option<&'a TextLabel> {
    let mut best: Option<(&TextLabel, f64)> = None;
    for label in candidates {
        let distance = label.position.distance(target);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((label, distance));
        }
    }
    best.map(|(label, _)| label)
}

/// Assigns a scribe to every polygon. Returns how many received one.
pub fn resolve_scribes(polygons: &mut [Polygon], labels: &[TextLabel], edge_proximity: f64) -> usize {
    let mut assigned = 0;
    for polygon in polygons.iter_mut() {
        polygon.scribe = find_scribe(polygon, labels, edge_proximity).map(|l| l.value().to_string());
        if polygon.scribe.is_some() {
            assigned += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_points(vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ])
    }

    fn label(x: f64, y: f64, value: &str) -> TextLabel {
        TextLabel::new((x, y), value).unwrap()
    }

    #[test]
    fn test_inside_label_wins() {
        let labels = vec![label(11.0, 5.0, "EDGE"), label(3.0, 3.0, "INSIDE")];
        let found = find_scribe(&square(0.0, 0.0, 10.0), &labels, 2.0);
        assert_eq!(found.map(TextLabel::value), Some("INSIDE"));
    }

    #[test]
    fn test_nearest_inside_label() {
        let labels = vec![label(1.0, 1.0, "FAR"), label(5.5, 5.0, "NEAR")];
        let found = find_scribe(&square(0.0, 0.0, 10.0), &labels, 2.0);
        assert_eq!(found.map(TextLabel::value), Some("NEAR"));
    }

    #[test]
    fn test_equidistant_labels_keep_first() {
        let labels = vec![label(3.0, 5.0, "FIRST"), label(7.0, 5.0, "SECOND")];
        let found = find_scribe(&square(0.0, 0.0, 10.0), &labels, 2.0);
        assert_eq!(found.map(TextLabel::value), Some("FIRST"));
    }

    #[test]
    fn test_edge_fallback() {
        let labels = vec![label(11.0, 5.0, "NEAR")];
        let found = find_scribe(&square(0.0, 0.0, 10.0), &labels, 2.0);
        assert_eq!(found.map(TextLabel::value), Some("NEAR"));
    }

    #[test]
    fn test_distant_label_ignored() {
        let labels = vec![label(110.0, 5.0, "FAR")];
        assert!(find_scribe(&square(0.0, 0.0, 10.0), &labels, 2.0).is_none());
    }

    #[test]
    fn test_resolve_counts_assignments() {
        let mut polygons = vec![square(0.0, 0.0, 10.0), square(100.0, 0.0, 10.0)];
        let labels = vec![label(5.0, 5.0, "P1")];
        assert_eq!(resolve_scribes(&mut polygons, &labels, 2.0), 1);
        assert_eq!(polygons[0].scribe.as_deref(), Some("P1"));
        assert_eq!(polygons[1].scribe, None);
    }
}
