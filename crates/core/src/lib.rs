//! # U-Takeoff Core
//!
//! Shared types for the U-Takeoff drawing takeoff engine.
//!
//! The engine turns the line work and text of a CAD template drawing into a
//! catalogue of manufacturable pieces. This crate holds the pieces that are
//! independent of the 2D pipeline itself:
//!
//! ## Core Components
//!
//! - **Geometry**: [`Point2D`], [`Bounds2D`]
//! - **Configuration**: [`TakeoffConfig`] with [`Tolerance`], [`SearchConfig`],
//!   [`LayerConfig`], [`LayerMarkers`] and [`ReportUnits`]
//! - **Output**: [`Catalogue`], [`PieceRecord`], [`CutoutRecord`],
//!   [`DrillHoleRecord`], [`ExtractionSummary`]
//! - **Diagnostics**: [`LogSink`], [`ProgressLog`], [`Stage`]
//!
//! ## Configuration
//!
//! ```rust
//! use u_takeoff_core::TakeoffConfig;
//!
//! let config = TakeoffConfig::new()
//!     .with_closeness(0.2)
//!     .with_point_on_edge(2.0)
//!     .with_max_depth(30)
//!     .with_target_layers(["PRIMARY", "SAWN"]);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod progress;
pub mod result;

// Re-exports
pub use config::{
    round_to, LayerConfig, LayerMarkers, ReportUnits, SearchConfig, TakeoffConfig, Tolerance,
    MAX_PRECISION,
};
pub use error::{Error, Result};
pub use geometry::{Bounds2D, Point2D};
pub use progress::{LogSink, ProgressLog, Stage};
pub use result::{Catalogue, CutoutRecord, DrillHoleRecord, ExtractionSummary, PieceRecord};
