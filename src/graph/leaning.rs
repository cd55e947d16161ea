//! Leaning adjustment: blends the reasoner's baseline "which side is
//! winning" score with locally observed invalidation.
//!
//! The displayed score is derived on read whenever the baseline or the
//! derived sets change; it is never stored in history.

use tracing::debug;

use super::invalidation::DerivedSets;
use super::types::{DebateMap, Speaker};

/// Default weight applied to the invalidation delta. Chosen so invalidation
/// shifts the score meaningfully without overriding the qualitative read.
pub const DEFAULT_ADJUSTMENT_WEIGHT: f64 = 0.7;

/// Share of a side's nodes that remain uninvalidated. A side with no nodes
/// is fully effective by definition.
pub fn effectiveness(map: &DebateMap, sets: &DerivedSets, side: Speaker) -> f64 {
    let total = map.node_count_for(side);
    if total == 0 {
        return 1.0;
    }
    let standing = map
        .nodes
        .iter()
        .filter(|n| n.speaker == side && !sets.is_invalidated(&n.id))
        .count();
    standing as f64 / total as f64
}

/// Blend the baseline score (-1..+1, negative favoring SideA) with the
/// effectiveness delta, clamped back into [-1, 1].
pub fn adjusted_leaning(
    baseline: f64,
    map: &DebateMap,
    sets: &DerivedSets,
    weight: f64,
) -> f64 {
    let eff_a = effectiveness(map, sets, Speaker::SideA);
    let eff_b = effectiveness(map, sets, Speaker::SideB);
    let adjustment = (eff_b - eff_a) * weight;
    let displayed = (baseline + adjustment).clamp(-1.0, 1.0);

    debug!(
        baseline,
        effectiveness_a = eff_a,
        effectiveness_b = eff_b,
        displayed,
        "Adjusted leaning"
    );

    displayed
}
