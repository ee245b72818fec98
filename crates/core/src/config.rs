//! Configuration for piece extraction.
//!
//! All tolerances and layer names are carried in an explicit [`TakeoffConfig`]
//! value that is passed to every pipeline stage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::{Error, Result};

/// Geometric tolerances, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerance {
    /// Two points closer than this are the same graph node.
    pub closeness: f64,

    /// A text label closer than this to a polygon edge is "near" it.
    pub point_on_edge: f64,

    /// Parallel-line threshold for segment intersection tests.
    /// Carried for completeness; loops are not filtered by crossing segments.
    pub segment_intersection: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            closeness: 0.2,
            point_on_edge: 2.0,
            segment_intersection: 0.01,
        }
    }
}

impl Tolerance {
    /// The point identity relation used everywhere in the pipeline.
    #[inline]
    pub fn are_close(&self, a: Point2D, b: Point2D) -> bool {
        a.distance(b) < self.closeness
    }

    /// Returns true if the undirected edges `(a1, b1)` and `(a2, b2)` coincide.
    #[inline]
    pub fn edges_equal(&self, e1: (Point2D, Point2D), e2: (Point2D, Point2D)) -> bool {
        (self.are_close(e1.0, e2.0) && self.are_close(e1.1, e2.1))
            || (self.are_close(e1.0, e2.1) && self.are_close(e1.1, e2.0))
    }
}

/// Limits for the cycle search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of points in a DFS path before the branch is abandoned.
    pub max_depth: usize,

    /// Optional cap on the number of DFS frames explored across all roots.
    /// `None` means unlimited.
    pub max_paths: Option<u64>,

    /// Decimal places used when building canonical loop keys.
    pub key_precision: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 30,
            max_paths: None,
            key_precision: 3,
        }
    }
}

/// Layer names that drive classification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerMarkers {
    pub primary: String,
    pub drainer_grooves: String,
    pub drill_hole: String,
    pub unpolished_cutout: String,
    pub polished_cutout: String,
    pub hand_finished_notch: String,
    pub splash: String,
    pub flat_polish: String,
    pub sawn: String,
}

impl Default for LayerMarkers {
    fn default() -> Self {
        Self {
            primary: "PRIMARY".into(),
            drainer_grooves: "DRAINER_GROOVES".into(),
            drill_hole: "DRILL_HOLE".into(),
            unpolished_cutout: "UNPOLISHED_CUTOUT".into(),
            polished_cutout: "POLISHED_CUTOUT".into(),
            hand_finished_notch: "HAND_FINISHED_NOTCH_".into(),
            splash: "SPLASH".into(),
            flat_polish: "FLAT_POLISH".into(),
            sawn: "SAWN".into(),
        }
    }
}

/// Which drawing layers feed which pipeline input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerConfig {
    /// Layers whose polylines make up piece boundaries and cutouts.
    /// Matched case-insensitively.
    pub target_layers: Vec<String>,

    /// The only layer whose text entities are used as scribes.
    pub text_layer: String,

    /// Layers whose circles and full arcs become drill holes.
    pub drill_layers: Vec<String>,

    /// Classifier markers.
    pub markers: LayerMarkers,
}

impl Default for LayerConfig {
    fn default() -> Self {
        let markers = LayerMarkers::default();
        Self {
            target_layers: vec![
                markers.primary.clone(),
                markers.drainer_grooves.clone(),
                markers.polished_cutout.clone(),
                markers.hand_finished_notch.clone(),
                markers.splash.clone(),
                markers.flat_polish.clone(),
                markers.sawn.clone(),
            ],
            text_layer: "TEXT".into(),
            drill_layers: vec![markers.drill_hole.clone(), markers.unpolished_cutout.clone()],
            markers,
        }
    }
}

impl LayerConfig {
    /// Returns true if `layer` is a configured target layer (case-insensitive).
    pub fn is_target(&self, layer: &str) -> bool {
        self.target_layers
            .iter()
            .any(|l| l.eq_ignore_ascii_case(layer))
    }

    /// Returns true if `layer` is a configured drill layer.
    pub fn is_drill(&self, layer: &str) -> bool {
        self.drill_layers.iter().any(|l| l == layer)
    }
}

/// Reporting units for catalogue metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportUnits {
    /// Drawing-unit area per reporting unit (mm² → m² is 1e6).
    pub area_scale: f64,

    /// Decimal places for reported areas.
    pub area_precision: u32,

    /// Decimal places for reported circumferences and diameters.
    pub length_precision: u32,
}

/// Largest number of decimals `round_to` can honour for an `f64`.
pub const MAX_PRECISION: u32 = 15;

impl Default for ReportUnits {
    fn default() -> Self {
        Self {
            area_scale: 1_000_000.0,
            area_precision: 6,
            length_precision: 3,
        }
    }
}

impl ReportUnits {
    /// Converts a drawing-unit area to reporting units, rounded.
    pub fn area(&self, raw: f64) -> f64 {
        round_to(raw / self.area_scale, self.area_precision)
    }

    /// Rounds a drawing-unit length to the reporting precision.
    pub fn length(&self, raw: f64) -> f64 {
        round_to(raw, self.length_precision)
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Configuration for a takeoff run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TakeoffConfig {
    /// Geometric tolerances.
    pub tolerance: Tolerance,

    /// Cycle search limits.
    pub search: SearchConfig,

    /// Number of sides used to approximate circular drill holes.
    pub circle_segments: usize,

    /// Minimum arc sweep (degrees) treated as a full circle.
    pub full_circle_sweep: f64,

    /// Layer routing and classifier markers.
    pub layers: LayerConfig,

    /// Reporting units.
    pub units: ReportUnits,
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            search: SearchConfig::default(),
            circle_segments: 20,
            full_circle_sweep: 359.9,
            layers: LayerConfig::default(),
            units: ReportUnits::default(),
        }
    }
}

impl TakeoffConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the point closeness tolerance.
    pub fn with_closeness(mut self, closeness: f64) -> Self {
        self.tolerance.closeness = closeness;
        self
    }

    /// Sets the edge proximity tolerance used for scribe fallback.
    pub fn with_point_on_edge(mut self, tolerance: f64) -> Self {
        self.tolerance.point_on_edge = tolerance;
        self
    }

    /// Sets the maximum DFS depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.search.max_depth = depth;
        self
    }

    /// Sets a cap on explored DFS frames.
    pub fn with_max_paths(mut self, max_paths: u64) -> Self {
        self.search.max_paths = Some(max_paths);
        self
    }

    /// Sets the number of sides used for circle approximation.
    pub fn with_circle_segments(mut self, segments: usize) -> Self {
        self.circle_segments = segments;
        self
    }

    /// Replaces the target layer list.
    pub fn with_target_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.target_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the text layer.
    pub fn with_text_layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.text_layer = layer.into();
        self
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let tol = &self.tolerance;
        if !(tol.closeness.is_finite() && tol.closeness > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "closeness tolerance must be positive, got {}",
                tol.closeness
            )));
        }
        if !(tol.point_on_edge.is_finite() && tol.point_on_edge >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "point_on_edge tolerance must be non-negative, got {}",
                tol.point_on_edge
            )));
        }
        if self.search.max_depth < 3 {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be at least 3, got {}",
                self.search.max_depth
            )));
        }
        if self.circle_segments < 3 {
            return Err(Error::InvalidConfig(format!(
                "circle_segments must be at least 3, got {}",
                self.circle_segments
            )));
        }
        if !(self.units.area_scale.is_finite() && self.units.area_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "area_scale must be positive, got {}",
                self.units.area_scale
            )));
        }
        for (name, precision) in [
            ("area_precision", self.units.area_precision),
            ("length_precision", self.units.length_precision),
        ] {
            if precision > MAX_PRECISION {
                return Err(Error::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_PRECISION, precision
                )));
            }
        }
        Ok(())
    }
}
