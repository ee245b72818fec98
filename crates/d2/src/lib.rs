//! # U-Takeoff 2D
//!
//! Piece extraction for the U-Takeoff drawing takeoff engine.
//!
//! This crate turns the line work and text of a worktop template drawing into
//! a catalogue of manufacturable pieces: closed outlines, their cutouts and
//! drill holes, the piece name written on the drawing and a category/process
//! derived from the edge-style layers.
//!
//! ## Features
//!
//! - Tolerance-based node merging with an R*-tree point index
//! - Bounded simple-cycle enumeration with canonical deduplication
//! - Scribe (label) assignment and smallest-area piece selection
//! - Cutout and drill-hole nesting
//! - Ordered, data-driven classification rules
//!
//! ## Quick Start
//!
//! ```rust
//! use u_takeoff_d2::{Extractor, Primitives, TakeoffConfig};
//!
//! let primitives = Primitives::new()
//!     .with_outline(&[(0.0, 0.0), (3000.0, 0.0), (3000.0, 600.0), (0.0, 600.0)], "PRIMARY")
//!     .with_label((1500.0, 300.0), "WT1");
//!
//! let extractor = Extractor::new(TakeoffConfig::default());
//! let extraction = extractor.extract(&primitives).unwrap();
//!
//! let piece = extraction.catalogue.find("WT1").unwrap();
//! assert_eq!(piece.category, "Worktop");
//! println!("{} is {} x {} ({} m2)", piece.piece, piece.length, piece.width, piece.max_square_meterage);
//! ```
//!
//! ## Drawing Entities
//!
//! ```rust
//! use u_takeoff_d2::{DrawingEntity, Extractor, Point2D};
//!
//! let entities = vec![
//!     DrawingEntity::Polyline {
//!         layer: "SAWN".into(),
//!         handle: "2A".into(),
//!         vertices: vec![
//!             Point2D::new(0.0, 0.0),
//!             Point2D::new(10.0, 0.0),
//!             Point2D::new(10.0, 10.0),
//!             Point2D::new(0.0, 10.0),
//!         ],
//!         closed: true,
//!         thickness: None,
//!     },
//!     DrawingEntity::Text {
//!         layer: "TEXT".into(),
//!         position: Point2D::new(5.0, 5.0),
//!         value: "P1".into(),
//!     },
//! ];
//!
//! let extraction = Extractor::default().extract_entities(&entities).unwrap();
//! assert_eq!(extraction.catalogue.category_counts.get("Unknown"), Some(&1));
//! ```

pub mod catalogue;
pub mod classify;
pub mod drill;
pub mod extractor;
pub mod geometry;
pub mod graph;
pub mod loops;
pub mod nesting;
pub mod polygon;
pub mod primitives;
pub mod scribe;
pub mod spatial_index;

// Re-exports
pub use catalogue::build_catalogue;
pub use classify::{Classification, Classifier, Condition, LayerScope, LayerSets, Rule};
pub use drill::detect_drill_holes;
pub use extractor::{Extraction, Extractor};
pub use graph::PlanarGraph;
pub use loops::{canonical_key, enumerate_loops, Loop, LoopSet};
pub use nesting::{nest_drill_holes, nest_holes, select_pieces, Selection};
pub use polygon::{assemble_polygons, Polygon, PolygonEdge};
pub use primitives::{
    collect_primitives, ArcSweep, DrawingEntity, DrillCandidate, Primitives, Segment, TextLabel,
};
pub use scribe::{find_scribe, resolve_scribes};
pub use spatial_index::{NodeId, PointIndex};
pub use u_takeoff_core::{
    Catalogue, Error, ExtractionSummary, LayerConfig, LayerMarkers, LogSink, PieceRecord, Point2D,
    Result, Stage, TakeoffConfig, Tolerance,
};
