//! Rule-based piece classification.
//!
//! A piece is classified from three layer sets: the layers of its attributed
//! boundary edges, the source layers of its holes and the source layers of
//! its drill holes. Rules are tried in order and the first match decides the
//! category and process.

use std::collections::HashSet;

use u_takeoff_core::LayerMarkers;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::polygon::Polygon;

/// Category and process reported when no rule matches.
pub const UNKNOWN: &str = "Unknown";

/// Which layer set a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayerScope {
    Piece,
    Holes,
    Drills,
}

/// A predicate over a piece's layer sets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    /// The scope contains the layer (exact match).
    Has(LayerScope, String),
    /// Every inner condition holds.
    All(Vec<Condition>),
}

impl Condition {
    fn has(scope: LayerScope, layer: &str) -> Self {
        Condition::Has(scope, layer.to_string())
    }

    /// Evaluates the condition.
    pub fn matches(&self, sets: &LayerSets<'_>) -> bool {
        match self {
            Condition::Has(scope, layer) => sets.scope(*scope).contains(layer.as_str()),
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(sets)),
        }
    }
}

/// One classification rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    pub condition: Condition,
    pub category: String,
    pub process: String,
}

impl Rule {
    pub fn new(condition: Condition, category: &str, process: &str) -> Self {
        Self {
            condition,
            category: category.to_string(),
            process: process.to_string(),
        }
    }
}

/// Layer sets of a piece, borrowed from the polygon.
#[derive(Debug, Clone, Default)]
pub struct LayerSets<'a> {
    pub piece: HashSet<&'a str>,
    pub holes: HashSet<&'a str>,
    pub drills: HashSet<&'a str>,
}

impl<'a> LayerSets<'a> {
    /// Collects the layer sets of a selected piece.
    pub fn of(piece: &'a Polygon) -> Self {
        Self {
            piece: piece.edge_layers().collect(),
            holes: piece
                .holes
                .iter()
                .filter_map(|h| h.source_layer.as_deref())
                .collect(),
            drills: piece
                .drill_holes
                .iter()
                .filter_map(|h| h.source_layer.as_deref())
                .collect(),
        }
    }

    fn scope(&self, scope: LayerScope) -> &HashSet<&'a str> {
        match scope {
            LayerScope::Piece => &self.piece,
            LayerScope::Holes => &self.holes,
            LayerScope::Drills => &self.drills,
        }
    }
}

/// Result of classifying one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub process: String,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            category: UNKNOWN.to_string(),
            process: UNKNOWN.to_string(),
        }
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Creates the standard rule set for the given layer markers.
    pub fn new(markers: &LayerMarkers) -> Self {
        use LayerScope::{Drills, Holes, Piece};
        let has = Condition::has;
        let m = markers;

        let rules = vec![
            Rule::new(has(Drills, &m.unpolished_cutout), "Processes", "Hob Cutout"),
            Rule::new(has(Piece, &m.drainer_grooves), "Processes", "Sink Groove Set"),
            Rule::new(
                Condition::All(vec![has(Piece, &m.primary), has(Drills, &m.drill_hole)]),
                "Worktop",
                "Sink Run",
            ),
            Rule::new(has(Holes, &m.polished_cutout), "Processes", "Belfast Sink Cut Out"),
            Rule::new(has(Piece, &m.hand_finished_notch), "Worktop", "Worktop Notch"),
            Rule::new(has(Piece, &m.primary), "Worktop", "Cnr Run"),
            Rule::new(
                Condition::All(vec![has(Piece, &m.splash), has(Piece, &m.flat_polish)]),
                "Upstand",
                "Splash Back",
            ),
            Rule::new(
                Condition::All(vec![has(Piece, &m.splash), has(Piece, &m.polished_cutout)]),
                "Upstand",
                "Splash Back with Cutout",
            ),
            Rule::new(
                Condition::All(vec![has(Piece, &m.flat_polish), has(Piece, &m.sawn)]),
                "Upstand",
                "Flat Polish",
            ),
        ];
        Self { rules }
    }

    /// Creates a classifier with a custom rule list.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies layer sets.
    pub fn classify_sets(&self, sets: &LayerSets<'_>) -> Classification {
        self.rules
            .iter()
            .find(|rule| rule.condition.matches(sets))
            .map(|rule| Classification {
                category: rule.category.clone(),
                process: rule.process.clone(),
            })
            .unwrap_or_else(Classification::unknown)
    }

    /// Classifies a selected piece.
    pub fn classify(&self, piece: &Polygon) -> Classification {
        self.classify_sets(&LayerSets::of(piece))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&LayerMarkers::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets<'a>(piece: &[&'a str], holes: &[&'a str], drills: &[&'a str]) -> LayerSets<'a> {
        LayerSets {
            piece: piece.iter().copied().collect(),
            holes: holes.iter().copied().collect(),
            drills: drills.iter().copied().collect(),
        }
    }

    fn check(sets: LayerSets<'_>, category: &str, process: &str) {
        let result = Classifier::default().classify_sets(&sets);
        assert_eq!(result.category, category);
        assert_eq!(result.process, process);
    }

    #[test]
    fn test_default_rule_count() {
        assert_eq!(Classifier::default().rules().len(), 9);
    }

    #[test]
    fn test_hob_cutout_beats_everything() {
        check(
            sets(&["PRIMARY", "DRAINER_GROOVES"], &["POLISHED_CUTOUT"], &["UNPOLISHED_CUTOUT"]),
            "Processes",
            "Hob Cutout",
        );
    }

    #[test]
    fn test_drainer_grooves() {
        check(sets(&["PRIMARY", "DRAINER_GROOVES"], &[], &[]), "Processes", "Sink Groove Set");
    }

    #[test]
    fn test_sink_run_needs_primary_and_drill() {
        check(sets(&["PRIMARY"], &[], &["DRILL_HOLE"]), "Worktop", "Sink Run");
        // No primary edge: drill hole alone falls through.
        check(sets(&["SAWN"], &[], &["DRILL_HOLE"]), UNKNOWN, UNKNOWN);
    }

    #[test]
    fn test_belfast_from_hole_layer() {
        check(sets(&["PRIMARY"], &["POLISHED_CUTOUT"], &[]), "Processes", "Belfast Sink Cut Out");
    }

    #[test]
    fn test_notch_before_corner_run() {
        check(sets(&["PRIMARY", "HAND_FINISHED_NOTCH_"], &[], &[]), "Worktop", "Worktop Notch");
        check(sets(&["PRIMARY", "SAWN"], &[], &[]), "Worktop", "Cnr Run");
    }

    #[test]
    fn test_upstands() {
        check(sets(&["SPLASH", "FLAT_POLISH"], &[], &[]), "Upstand", "Splash Back");
        check(
            sets(&["SPLASH", "POLISHED_CUTOUT"], &[], &[]),
            "Upstand",
            "Splash Back with Cutout",
        );
        check(sets(&["FLAT_POLISH", "SAWN"], &[], &[]), "Upstand", "Flat Polish");
    }

    #[test]
    fn test_polished_cutout_on_piece_is_not_a_hole() {
        check(sets(&["POLISHED_CUTOUT"], &[], &[]), UNKNOWN, UNKNOWN);
    }

    #[test]
    fn test_empty_sets_are_unknown() {
        check(LayerSets::default(), UNKNOWN, UNKNOWN);
    }

    #[test]
    fn test_custom_markers() {
        let markers = LayerMarkers {
            primary: "EDGE_A".to_string(),
            ..LayerMarkers::default()
        };
        let classifier = Classifier::new(&markers);
        let result = classifier.classify_sets(&sets(&["EDGE_A"], &[], &[]));
        assert_eq!(result.process, "Cnr Run");
    }

    #[test]
    fn test_custom_rules() {
        let classifier = Classifier::with_rules(vec![Rule::new(
            Condition::Has(LayerScope::Piece, "SAWN".to_string()),
            "Offcut",
            "Saw Only",
        )]);
        let result = classifier.classify_sets(&sets(&["SAWN"], &[], &[]));
        assert_eq!(result.category, "Offcut");
    }
}
