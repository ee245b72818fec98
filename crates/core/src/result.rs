//! Catalogue (extraction output) representation.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metrics of a cutout nested inside a piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct CutoutRecord {
    /// Bounding-box extent along x, drawing units.
    pub length: f64,
    /// Bounding-box extent along y, drawing units.
    pub width: f64,
    /// Area in reporting units.
    pub max_square_meterage: f64,
}

/// Metrics of a circular drill hole nested inside a piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct DrillHoleRecord {
    /// Area in reporting units.
    pub area: f64,
    /// Perimeter of the approximating polygon, drawing units.
    pub circumference: f64,
    /// Diameter derived from the area, assuming a true circle.
    pub diameter: f64,
}

/// One manufacturable piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct PieceRecord {
    /// Scribe (piece name).
    pub piece: String,
    /// Bounding-box extent along x.
    pub length: f64,
    /// Bounding-box extent along y.
    pub width: f64,
    /// Area in reporting units.
    pub max_square_meterage: f64,
    /// Business category (e.g. "Worktop").
    pub category: String,
    /// Manufacturing process (e.g. "Cnr Run").
    pub processes: String,
    /// Boundary edge count per layer.
    pub edge_styles: BTreeMap<String, usize>,
    /// Nested cutouts.
    pub cutouts: Vec<CutoutRecord>,
    /// Nested drill holes.
    pub drill_holes: Vec<DrillHoleRecord>,
}

/// Pieces grouped by category.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct Catalogue {
    /// Number of pieces per category.
    pub category_counts: BTreeMap<String, usize>,
    /// Pieces per category, in extraction order.
    pub pieces: BTreeMap<String, Vec<PieceRecord>>,
}

impl Catalogue {
    /// Creates a new empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a piece under its category and updates the count.
    pub fn push(&mut self, record: PieceRecord) {
        *self
            .category_counts
            .entry(record.category.clone())
            .or_insert(0) += 1;
        self.pieces
            .entry(record.category.clone())
            .or_default()
            .push(record);
    }

    /// Total number of pieces across all categories.
    pub fn piece_count(&self) -> usize {
        self.category_counts.values().sum()
    }

    /// Returns true if no pieces were extracted.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Iterates over every piece, category by category.
    pub fn iter_pieces(&self) -> impl Iterator<Item = &PieceRecord> {
        self.pieces.values().flatten()
    }

    /// Finds a piece by scribe.
    pub fn find(&self, scribe: &str) -> Option<&PieceRecord> {
        self.iter_pieces().find(|p| p.piece == scribe)
    }
}

impl FromIterator<PieceRecord> for Catalogue {
    fn from_iter<T: IntoIterator<Item = PieceRecord>>(iter: T) -> Self {
        let mut catalogue = Catalogue::new();
        for record in iter {
            catalogue.push(record);
        }
        catalogue
    }
}

/// Stage counts collected during an extraction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractionSummary {
    /// Segments fed to the graph builder.
    pub segments: usize,
    /// Text labels considered for scribes.
    pub labels: usize,
    /// Distinct graph nodes after tolerance merging.
    pub nodes: usize,
    /// Distinct loops after canonical deduplication.
    pub loops: usize,
    /// Whether the loop search hit its path budget.
    pub search_truncated: bool,
    /// Polygons carrying a scribe.
    pub scribed_polygons: usize,
    /// Selected pieces.
    pub pieces: usize,
    /// Hole candidates nested into a piece.
    pub holes_assigned: usize,
    /// Drill holes detected from circle/arc entities.
    pub drill_holes_found: usize,
    /// Drill holes nested into a piece.
    pub drill_holes_assigned: usize,
    /// Wall-clock time in milliseconds.
    pub computation_time_ms: u64,
}
