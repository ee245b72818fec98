//! Converts selected pieces into catalogue records.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use u_takeoff_core::{round_to, Catalogue, CutoutRecord, DrillHoleRecord, PieceRecord, ReportUnits};

use crate::classify::{Classification, Classifier};
use crate::polygon::Polygon;

/// Edge-style histogram: attributed boundary edges counted by layer.
pub fn edge_styles(piece: &Polygon) -> BTreeMap<String, usize> {
    let mut styles = BTreeMap::new();
    for layer in piece.edge_layers() {
        *styles.entry(layer.to_string()).or_insert(0) += 1;
    }
    styles
}

pub fn cutout_record(hole: &Polygon, units: &ReportUnits) -> CutoutRecord {
    CutoutRecord {
        length: hole.bounds.width(),
        width: hole.bounds.height(),
        max_square_meterage: units.area(hole.area),
    }
}

/// Drill hole measurements. The diameter is derived from the polygon area
/// in drawing units, so it is slightly under the true circle diameter.
pub fn drill_hole_record(hole: &Polygon, units: &ReportUnits) -> DrillHoleRecord {
    DrillHoleRecord {
        area: units.area(hole.area),
        circumference: units.length(hole.perimeter()),
        diameter: round_to(2.0 * (hole.area / PI).sqrt(), units.length_precision),
    }
}

/// Builds the record of one classified piece.
pub fn piece_record(piece: &Polygon, class: Classification, units: &ReportUnits) -> PieceRecord {
    PieceRecord {
        piece: piece.scribe.clone().unwrap_or_default(),
        length: piece.bounds.width(),
        width: piece.bounds.height(),
        max_square_meterage: units.area(piece.area),
        category: class.category,
        processes: class.process,
        edge_styles: edge_styles(piece),
        cutouts: piece.holes.iter().map(|h| cutout_record(h, units)).collect(),
        drill_holes: piece
            .drill_holes
            .iter()
            .map(|h| drill_hole_record(h, units))
            .collect(),
    }
}

/// Classifies every piece and groups the records by category.
pub fn build_catalogue(pieces: &[Polygon], classifier: &Classifier, units: &ReportUnits) -> Catalogue {
    pieces
        .iter()
        .map(|piece| piece_record(piece, classifier.classify(piece), units))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use u_takeoff_core::Point2D;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Polygon::from_points(vec![
            Point2D::new(x, y),
            Point2D::new(x + w, y),
            Point2D::new(x + w, y + h),
            Point2D::new(x, y + h),
        ])
    }

    #[test]
    fn test_piece_dimensions_and_area() {
        let mut piece = rect(0.0, 0.0, 3000.0, 600.0);
        piece.scribe = Some("WT1".to_string());
        let record = piece_record(&piece, Classification::unknown(), &ReportUnits::default());

        assert_eq!(record.piece, "WT1");
        assert_relative_eq!(record.length, 3000.0);
        assert_relative_eq!(record.width, 600.0);
        assert_relative_eq!(record.max_square_meterage, 1.8);
        assert!(record.edge_styles.is_empty());
    }

    #[test]
    fn test_area_rounded_to_six_places() {
        let piece = rect(0.0, 0.0, 10.0, 10.0);
        let record = piece_record(&piece, Classification::unknown(), &ReportUnits::default());
        assert_relative_eq!(record.max_square_meterage, 0.0001);
    }

    #[test]
    fn test_cutout_record() {
        let hole = rect(100.0, 100.0, 500.0, 400.0);
        let record = cutout_record(&hole, &ReportUnits::default());
        assert_relative_eq!(record.length, 500.0);
        assert_relative_eq!(record.width, 400.0);
        assert_relative_eq!(record.max_square_meterage, 0.2);
    }

    #[test]
    fn test_drill_hole_diameter_close_to_circle() {
        let hole = Polygon::drill_hole(Point2D::new(0.0, 0.0), 17.5, 20, "DRILL_HOLE");
        let record = drill_hole_record(&hole, &ReportUnits::default());
        // A 20-gon slightly under-measures the circle.
        assert!(record.diameter < 35.0);
        assert_relative_eq!(record.diameter, 35.0, epsilon = 0.6);
        assert!(record.circumference < 35.0 * PI);
        assert_relative_eq!(record.circumference, 35.0 * PI, epsilon = 0.5);
    }

    #[test]
    fn test_build_catalogue_groups_by_category() {
        let mut a = rect(0.0, 0.0, 10.0, 10.0);
        a.scribe = Some("A".to_string());
        let mut b = rect(20.0, 0.0, 10.0, 10.0);
        b.scribe = Some("B".to_string());

        let catalogue = build_catalogue(&[a, b], &Classifier::default(), &ReportUnits::default());
        assert_eq!(catalogue.category_counts.get("Unknown"), Some(&2));
        let names: Vec<_> = catalogue.pieces["Unknown"].iter().map(|p| p.piece.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
