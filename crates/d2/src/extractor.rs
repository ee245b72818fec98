//! Extraction pipeline entry point.

use std::time::Instant;

use u_takeoff_core::{
    Catalogue, ExtractionSummary, LogSink, Point2D, ProgressLog, Result, Stage, TakeoffConfig,
};

use crate::catalogue::build_catalogue;
use crate::classify::Classifier;
use crate::drill::detect_drill_holes;
use crate::graph::PlanarGraph;
use crate::loops::enumerate_loops;
use crate::nesting::{nest_drill_holes, nest_holes, select_pieces};
use crate::polygon::assemble_polygons;
use crate::primitives::{collect_primitives, DrawingEntity, Primitives};
use crate::scribe::resolve_scribes;

/// Output of one extraction.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Classified pieces grouped by category.
    pub catalogue: Catalogue,
    /// Stage counts and timing.
    pub summary: ExtractionSummary,
    /// Every enumerated loop, for debug drawing.
    pub loops: Vec<Vec<Point2D>>,
}

/// Runs the takeoff pipeline.
pub struct Extractor {
    config: TakeoffConfig,
    classifier: Classifier,
    log: ProgressLog,
}

impl Extractor {
    /// Creates a new extractor with the given configuration.
    pub fn new(config: TakeoffConfig) -> Self {
        let classifier = Classifier::new(&config.layers.markers);
        Self {
            config,
            classifier,
            log: ProgressLog::new(),
        }
    }

    /// Creates an extractor with default configuration.
    pub fn default_config() -> Self {
        Self::new(TakeoffConfig::default())
    }

    /// Forwards progress messages to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.log = ProgressLog::with_sink(sink);
        self
    }

    /// Replaces the classification rules.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &TakeoffConfig {
        &self.config
    }

    /// Collects primitives from drawing entities, then extracts.
    pub fn extract_entities(&self, entities: &[DrawingEntity]) -> Result<Extraction> {
        self.config.validate()?;
        let primitives = collect_primitives(entities, &self.config.layers, &self.log)?;
        self.extract(&primitives)
    }

    /// Extracts the piece catalogue from primitives.
    pub fn extract(&self, primitives: &Primitives) -> Result<Extraction> {
        let start = Instant::now();
        self.config.validate()?;
        primitives.validate()?;

        let config = &self.config;
        let tolerance = &config.tolerance;
        let mut summary = ExtractionSummary {
            segments: primitives.segments.len(),
            labels: primitives.labels.len(),
            ..ExtractionSummary::default()
        };

        let graph = PlanarGraph::build(&primitives.segments, *tolerance);
        summary.nodes = graph.node_count();
        self.log.info(
            Stage::Graph,
            format!("{} nodes, {} edges", graph.node_count(), graph.edge_count()),
        );

        let found = enumerate_loops(&graph, &config.search);
        summary.loops = found.loops.len();
        summary.search_truncated = found.truncated;
        self.log.info(
            Stage::Loops,
            format!("Cycles found (before deduplication): {}", found.cycles_found),
        );
        if found.truncated {
            self.log.warn(Stage::Loops, "Search budget reached; loop list is partial");
        }

        let mut polygons = assemble_polygons(&found.loops, &graph, &primitives.segments);
        self.log
            .debug(Stage::Polygons, format!("{} polygons assembled", polygons.len()));

        summary.scribed_polygons =
            resolve_scribes(&mut polygons, &primitives.labels, tolerance.point_on_edge);
        self.log.debug(
            Stage::Scribes,
            format!("{} of {} polygons scribed", summary.scribed_polygons, polygons.len()),
        );

        let selection = select_pieces(polygons);
        let mut pieces = selection.pieces;
        summary.holes_assigned = nest_holes(&mut pieces, selection.leftovers, tolerance);
        summary.pieces = pieces.len();
        self.log.info(
            Stage::Nesting,
            format!(
                "Final top-level pieces count: {} ({} cutouts)",
                pieces.len(),
                summary.holes_assigned
            ),
        );

        let drill_holes = detect_drill_holes(&primitives.drill_candidates, config);
        summary.drill_holes_found = drill_holes.len();
        summary.drill_holes_assigned = nest_drill_holes(&mut pieces, drill_holes, tolerance);
        self.log.info(
            Stage::DrillHoles,
            format!(
                "Drill holes found: {}, assigned: {}",
                summary.drill_holes_found, summary.drill_holes_assigned
            ),
        );

        let catalogue = build_catalogue(&pieces, &self.classifier, &config.units);
        for (category, count) in &catalogue.category_counts {
            self.log
                .debug(Stage::Output, format!("{}: {} piece(s)", category, count));
        }

        summary.computation_time_ms = start.elapsed().as_millis() as u64;
        Ok(Extraction {
            catalogue,
            summary,
            loops: found
                .loops
                .into_iter()
                .map(|found| found.points().to_vec())
                .collect(),
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::default_config()
    }
}
