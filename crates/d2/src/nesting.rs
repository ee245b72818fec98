//! Piece selection and hole nesting.
//!
//! Loop enumeration over-produces: a piece with a cutout also yields loops
//! that combine the cutout path with part of the outer boundary, and those
//! loops usually pick up the same scribe. Keeping only the smallest polygon
//! per scribe leaves the true piece, and the leftovers are offered to the
//! pieces as holes.

use u_takeoff_core::Tolerance;

use crate::polygon::Polygon;

/// Pieces chosen by [`select_pieces`] and the polygons left over.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// One polygon per scribe, in order of the scribe's first appearance.
    pub pieces: Vec<Polygon>,
    /// Every other polygon, in input order.
    pub leftovers: Vec<Polygon>,
}

/// Keeps the smallest-area polygon for each scribe.
///
/// Polygons without a scribe go straight to the leftovers. Equal areas keep
/// the earlier polygon.
pub fn select_pieces(polygons: Vec<Polygon>) -> Selection {
    // (scribe, index of the current winner)
    let mut groups: Vec<(String, usize)> = Vec::new();
    for (index, polygon) in polygons.iter().enumerate() {
        let Some(scribe) = polygon.scribe.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| name == scribe) {
            Some((_, winner)) => {
                if polygon.area < polygons[*winner].area {
                    *winner = index;
                }
            }
            None => groups.push((scribe.to_string(), index)),
        }
    }

    let mut slots: Vec<Option<Polygon>> = polygons.into_iter().map(Some).collect();
    let pieces = groups
        .iter()
        .filter_map(|(_, index)| slots[*index].take())
        .collect();
    let leftovers = slots.into_iter().flatten().collect();

    Selection { pieces, leftovers }
}

/// Attaches each candidate to the first piece that contains it.
///
/// Returns the number of holes assigned; uncontained candidates are dropped.
pub fn nest_holes(pieces: &mut [Polygon], candidates: Vec<Polygon>, tolerance: &Tolerance) -> usize {
    let mut assigned = 0;
    for hole in candidates {
        if let Some(piece) = pieces.iter_mut().find(|p| p.contains(&hole, tolerance)) {
            log::debug!(
                "Added polygon with area {:.3} as cutout inside piece '{}'",
                hole.area,
                piece.scribe.as_deref().unwrap_or_default()
            );
            piece.holes.push(hole);
            assigned += 1;
        }
    }
    assigned
}

/// Attaches each drill hole to the first piece that contains it.
pub fn nest_drill_holes(
    pieces: &mut [Polygon],
    drill_holes: Vec<Polygon>,
    tolerance: &Tolerance,
) -> usize {
    let mut assigned = 0;
    for hole in drill_holes {
        if let Some(piece) = pieces.iter_mut().find(|p| p.contains(&hole, tolerance)) {
            piece.drill_holes.push(hole);
            assigned += 1;
        }
    }
    assigned
}
