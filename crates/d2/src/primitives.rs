//! Drawing entities and the primitives the pipeline consumes.
//!
//! A drawing arrives as an ordered list of [`DrawingEntity`] records (already
//! parsed from the native format). [`collect_primitives`] filters them down to
//! boundary segments, scribe labels and drill-hole candidates according to
//! the configured layers.

use u_takeoff_core::{Error, LayerConfig, Point2D, ProgressLog, Result, Stage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed drawing entity with its layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DrawingEntity {
    /// 2D polyline (open or closed).
    Polyline {
        layer: String,
        /// Entity handle, kept for traceability.
        #[cfg_attr(feature = "serde", serde(default))]
        handle: String,
        vertices: Vec<Point2D>,
        #[cfg_attr(feature = "serde", serde(default))]
        closed: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        thickness: Option<f64>,
    },
    /// Single-line text.
    Text {
        layer: String,
        position: Point2D,
        value: String,
    },
    /// Multi-line text, already reduced to plain text.
    #[cfg_attr(feature = "serde", serde(rename = "mtext"))]
    MText {
        layer: String,
        position: Point2D,
        value: String,
    },
    /// Full circle.
    Circle {
        layer: String,
        center: Point2D,
        radius: f64,
    },
    /// Circular arc; angles in degrees.
    Arc {
        layer: String,
        center: Point2D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

/// A straight boundary segment with its source layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
    pub layer: String,
    /// Handle of the polyline this segment came from.
    pub source: String,
    pub thickness: Option<f64>,
}

impl Segment {
    /// Creates a segment with no source handle or thickness.
    pub fn new(start: impl Into<Point2D>, end: impl Into<Point2D>, layer: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            layer: layer.into(),
            source: String::new(),
            thickness: None,
        }
    }

}

/// A text label that may name a piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTextLabel"))]
pub struct TextLabel {
    pub position: Point2D,
    value: String,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTextLabel {
    position: Point2D,
    value: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTextLabel> for TextLabel {
    type Error = String;

    fn try_from(raw: RawTextLabel) -> std::result::Result<Self, Self::Error> {
        TextLabel::new(raw.position, &raw.value).ok_or_else(|| "label value is blank".to_string())
    }
}

impl TextLabel {
    /// Creates a label with a trimmed value; `None` if the value is blank.
    pub fn new(position: impl Into<Point2D>, value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            position: position.into(),
            value: trimmed.to_string(),
        })
    }

    /// The trimmed label text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Angular extent of a drill candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArcSweep {
    FullCircle,
    /// Sweep in degrees (end angle minus start angle).
    Degrees(f64),
}

/// A circle or arc that may be a drill hole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrillCandidate {
    pub center: Point2D,
    pub radius: f64,
    pub sweep: ArcSweep,
    pub layer: String,
}

impl DrillCandidate {
    /// Creates a full-circle candidate.
    pub fn circle(center: impl Into<Point2D>, radius: f64, layer: impl Into<String>) -> Self {
        Self {
            center: center.into(),
            radius,
            sweep: ArcSweep::FullCircle,
            layer: layer.into(),
        }
    }

    /// Creates an arc candidate from start/end angles in degrees.
    pub fn arc(
        center: impl Into<Point2D>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        layer: impl Into<String>,
    ) -> Self {
        Self {
            center: center.into(),
            radius,
            sweep: ArcSweep::Degrees(end_angle - start_angle),
            layer: layer.into(),
        }
    }

    /// Returns true if the candidate closes on itself.
    pub fn is_full_circle(&self, min_sweep_deg: f64) -> bool {
        match self.sweep {
            ArcSweep::FullCircle => true,
            ArcSweep::Degrees(sweep) => sweep.abs() >= min_sweep_deg,
        }
    }
}

/// Everything the pipeline needs from a drawing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitives {
    pub segments: Vec<Segment>,
    pub labels: Vec<TextLabel>,
    pub drill_candidates: Vec<DrillCandidate>,
}

impl Primitives {
    /// Creates an empty primitive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a segment.
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Adds the closed outline through `points` as segments on `layer`.
    pub fn with_outline(mut self, points: &[(f64, f64)], layer: &str) -> Self {
        let n = points.len();
        for i in 0..n {
            self.segments
                .push(Segment::new(points[i], points[(i + 1) % n], layer));
        }
        self
    }

    /// Adds a label; blank values are ignored.
    pub fn with_label(mut self, position: (f64, f64), value: &str) -> Self {
        if let Some(label) = TextLabel::new(position, value) {
            self.labels.push(label);
        }
        self
    }

    /// Adds a drill candidate.
    pub fn with_drill_candidate(mut self, candidate: DrillCandidate) -> Self {
        self.drill_candidates.push(candidate);
        self
    }

    /// Checks that every coordinate is finite and every radius positive.
    pub fn validate(&self) -> Result<()> {
        for (i, s) in self.segments.iter().enumerate() {
            if !s.start.is_finite() || !s.end.is_finite() {
                return Err(Error::InvalidGeometry(format!(
                    "segment {} on layer '{}' has non-finite coordinates",
                    i, s.layer
                )));
            }
        }
        for label in &self.labels {
            if !label.position.is_finite() {
                return Err(Error::InvalidGeometry(format!(
                    "label '{}' has a non-finite position",
                    label.value()
                )));
            }
            if label.value.is_empty() || label.value.trim() != label.value {
                return Err(Error::InvalidGeometry(format!(
                    "label at ({}, {}) has an untrimmed or blank value",
                    label.position.x, label.position.y
                )));
            }
        }
        for c in &self.drill_candidates {
            if !c.center.is_finite() || !(c.radius.is_finite() && c.radius > 0.0) {
                return Err(Error::InvalidGeometry(format!(
                    "drill candidate on layer '{}' has radius {} at ({}, {})",
                    c.layer, c.radius, c.center.x, c.center.y
                )));
            }
        }
        Ok(())
    }
}

/// Filters drawing entities into pipeline primitives.
///
/// - Polylines on a target layer become one segment per vertex pair; closed
///   polylines also contribute the closing segment.
/// - Text on the text layer becomes labels (blank text is dropped).
/// - Circles and arcs on a drill layer become drill candidates.
pub fn collect_primitives(
    entities: &[DrawingEntity],
    layers: &LayerConfig,
    log: &ProgressLog,
) -> Result<Primitives> {
    let mut primitives = Primitives::new();

    for entity in entities {
        match entity {
            DrawingEntity::Polyline {
                layer,
                handle,
                vertices,
                closed,
                thickness,
            } => {
                if !layers.is_target(layer) {
                    continue;
                }
                let make = |a: Point2D, b: Point2D| Segment {
                    start: a,
                    end: b,
                    layer: layer.clone(),
                    source: handle.clone(),
                    thickness: *thickness,
                };
                for pair in vertices.windows(2) {
                    primitives.segments.push(make(pair[0], pair[1]));
                }
                if *closed && vertices.len() > 1 {
                    let first = vertices[0];
                    let last = vertices[vertices.len() - 1];
                    primitives.segments.push(make(last, first));
                }
            }
            DrawingEntity::Text {
                layer,
                position,
                value,
            }
            | DrawingEntity::MText {
                layer,
                position,
                value,
            } => {
                if *layer != layers.text_layer {
                    continue;
                }
                if let Some(label) = TextLabel::new(*position, value) {
                    primitives.labels.push(label);
                }
            }
            DrawingEntity::Circle {
                layer,
                center,
                radius,
            } => {
                if layers.is_drill(layer) {
                    primitives
                        .drill_candidates
                        .push(DrillCandidate::circle(*center, *radius, layer.clone()));
                }
            }
            DrawingEntity::Arc {
                layer,
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                if layers.is_drill(layer) {
                    primitives.drill_candidates.push(DrillCandidate::arc(
                        *center,
                        *radius,
                        *start_angle,
                        *end_angle,
                        layer.clone(),
                    ));
                }
            }
        }
    }

    primitives.validate()?;

    log.info(
        Stage::Collect,
        format!(
            "Total segments collected from target layers: {}",
            primitives.segments.len()
        ),
    );
    log.info(
        Stage::Collect,
        format!("Total text entities collected: {}", primitives.labels.len()),
    );
    log.debug(
        Stage::Collect,
        format!("Drill candidates collected: {}", primitives.drill_candidates.len()),
    );

    Ok(primitives)
}
