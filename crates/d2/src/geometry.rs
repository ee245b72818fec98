//! 2D polygon predicates and measurements.
//!
//! Rings are slices of [`Point2D`] with an implicit closing edge from the
//! last vertex back to the first.

use geo::{
    Area, Coord, Distance, Euclidean, Length, Line, LineString, Point, Polygon as GeoPolygon,
};
use u_takeoff_core::{Point2D, Tolerance};

/// Iterates over the edges of a closed ring, including the closing edge.
pub fn ring_edges(points: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Converts a ring to a geo polygon without holes.
pub fn to_geo_polygon(points: &[Point2D]) -> GeoPolygon<f64> {
    let exterior = LineString::from(points.iter().map(|&p| coord(p)).collect::<Vec<_>>());
    GeoPolygon::new(exterior, Vec::new())
}

/// Unsigned area of a ring (shoelace formula).
pub fn ring_area(points: &[Point2D]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(points).unsigned_area()
}

/// Length of the closed polyline through `points`.
pub fn ring_perimeter(points: &[Point2D]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    to_geo_polygon(points).exterior().length::<Euclidean>()
}

/// Arithmetic mean of the vertices.
///
/// This is not the area centroid; scribe resolution ranks labels by their
/// distance to this point.
pub fn vertex_centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::default();
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2D::new(sx / n, sy / n)
}

/// Ray-casting point-in-polygon test.
///
/// Points exactly on an edge may fall either way; callers treat the result
/// as "strictly inside".
pub fn point_in_polygon(p: Point2D, ring: &[Point2D]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = ring[i];
        let pj = ring[j];
        // The first test guarantees pi.y != pj.y, so the division is safe.
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the segment `a`-`b`, with the projection clamped
/// to the segment. A degenerate segment measures to `a`.
pub fn distance_to_segment(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let line = Line::new(coord(a), coord(b));
    Euclidean::distance(&Point::from(coord(p)), &line)
}

#[inline]
fn coord(p: Point2D) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Returns true if `p` is closer than `tolerance` to any edge of the ring.
pub fn is_point_near_ring(p: Point2D, ring: &[Point2D], tolerance: f64) -> bool {
    ring_edges(ring).any(|(a, b)| distance_to_segment(p, a, b) < tolerance)
}

/// Returns true if `candidate` lies strictly inside `container`.
///
/// Every candidate vertex must pass the point-in-polygon test, and no
/// candidate edge may coincide with a container edge: a shared edge means
/// the two rings are parts of the same boundary, not a cutout.
pub fn is_contained(candidate: &[Point2D], container: &[Point2D], tolerance: &Tolerance) -> bool {
    if candidate.is_empty() {
        return false;
    }
    if !candidate.iter().all(|&p| point_in_polygon(p, container)) {
        return false;
    }
    !ring_edges(candidate).any(|ce| ring_edges(container).any(|pe| tolerance.edges_equal(ce, pe)))
}

/// Regular polygon with `segments` vertices approximating a circle.
pub fn approximate_circle(center: Point2D, radius: f64, segments: usize) -> Vec<Point2D> {
    let step = std::f64::consts::TAU / segments as f64;
    (0..segments)
        .map(|i| {
            let angle = i as f64 * step;
            Point2D::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ring(raw: &[(f64, f64)]) -> Vec<Point2D> {
        raw.iter().map(|&p| p.into()).collect()
    }

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2D> {
        ring(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    #[test]
    fn test_square_area() {
        assert_relative_eq!(ring_area(&square(0.0, 0.0, 10.0)), 100.0);
    }

    #[test]
    fn test_triangle_area() {
        let tri = ring(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        assert_relative_eq!(ring_area(&tri), 6.0);
    }

    #[test]
    fn test_area_ignores_winding() {
        let mut sq = square(0.0, 0.0, 10.0);
        sq.reverse();
        assert_relative_eq!(ring_area(&sq), 100.0);
    }

    #[test]
    fn test_area_degenerate() {
        assert_eq!(ring_area(&ring(&[(0.0, 0.0), (1.0, 1.0)])), 0.0);
        let collinear = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_relative_eq!(ring_area(&collinear), 0.0);
    }

    #[test]
    fn test_perimeter() {
        assert_relative_eq!(ring_perimeter(&square(0.0, 0.0, 10.0)), 40.0);
        let tri = ring(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
        assert_relative_eq!(ring_perimeter(&tri), 12.0);
        assert_eq!(ring_perimeter(&ring(&[(1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_perimeter_of_open_input_closes_ring() {
        // The closing edge is counted once, whether or not the last point
        // repeats the first.
        let open = square(0.0, 0.0, 10.0);
        let mut closed = open.clone();
        closed.push(open[0]);
        assert_relative_eq!(ring_perimeter(&open), ring_perimeter(&closed));
    }

    #[test]
    fn test_vertex_centroid() {
        let c = vertex_centroid(&square(0.0, 0.0, 10.0));
        assert_relative_eq!(c.x, 5.0);
        assert_relative_eq!(c.y, 5.0);
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(Point2D::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(Point2D::new(15.0, 5.0), &sq));
        assert!(!point_in_polygon(Point2D::new(5.0, -1.0), &sq));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        let l_shape = ring(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);
        assert!(point_in_polygon(Point2D::new(5.0, 15.0), &l_shape));
        assert!(!point_in_polygon(Point2D::new(15.0, 15.0), &l_shape));
    }

    #[test]
    fn test_distance_to_segment_clamps() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);
        assert_relative_eq!(distance_to_segment(Point2D::new(5.0, 3.0), a, b), 3.0);
        assert_relative_eq!(distance_to_segment(Point2D::new(-3.0, 4.0), a, b), 5.0);
        assert_relative_eq!(distance_to_segment(Point2D::new(13.0, 4.0), a, b), 5.0);
        assert_relative_eq!(distance_to_segment(Point2D::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_distance_to_segment_on_segment() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 10.0);
        assert_relative_eq!(distance_to_segment(Point2D::new(5.0, 5.0), a, b), 0.0);
        assert_relative_eq!(
            distance_to_segment(Point2D::new(0.0, 10.0), a, b),
            50f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_point_near_ring() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(is_point_near_ring(Point2D::new(11.0, 5.0), &sq, 2.0));
        assert!(!is_point_near_ring(Point2D::new(110.0, 5.0), &sq, 2.0));
    }

    #[test]
    fn test_contained_square() {
        let tol = Tolerance::default();
        let outer = square(0.0, 0.0, 100.0);
        let inner = square(25.0, 25.0, 50.0);
        assert!(is_contained(&inner, &outer, &tol));
        assert!(!is_contained(&outer, &inner, &tol));
    }

    #[test]
    fn test_not_contained_in_itself() {
        let tol = Tolerance::default();
        let sq = square(0.0, 0.0, 10.0);
        assert!(!is_contained(&sq, &sq, &tol));
    }

    #[test]
    fn test_shared_edge_disqualifies() {
        let tol = Tolerance::default();
        // Every candidate vertex passes the ray test, but the bottom edge is
        // also a container edge.
        let container = ring(&[(0.0, 0.0), (10.0, 0.0), (20.0, -5.0), (20.0, 10.0), (0.0, 10.0)]);
        let candidate = ring(&[(0.0, 0.0), (10.0, 0.0), (5.0, 5.0)]);
        assert!(candidate.iter().all(|&p| point_in_polygon(p, &container)));
        assert!(!is_contained(&candidate, &container, &tol));

        let shifted = ring(&[(1.0, 1.0), (9.0, 1.0), (5.0, 5.0)]);
        assert!(is_contained(&shifted, &container, &tol));
    }

    #[test]
    fn test_approximate_circle() {
        let center = Point2D::new(50.0, 50.0);
        let pts = approximate_circle(center, 10.0, 20);
        assert_eq!(pts.len(), 20);
        for p in &pts {
            assert_relative_eq!(p.distance(center), 10.0, epsilon = 1e-9);
        }
        // Area of a regular n-gon inscribed in the circle.
        let expected = 0.5 * 20.0 * 100.0 * (std::f64::consts::TAU / 20.0).sin();
        assert_relative_eq!(ring_area(&pts), expected, epsilon = 1e-6);
    }
}
