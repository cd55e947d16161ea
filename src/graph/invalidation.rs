//! Invalidation propagation over the argument graph.
//!
//! Derives five id-sets from the current map via backward reachability:
//! - faded: settled nodes (agreed or retracted) and everything arguing for
//!   or against them
//! - contradiction/walkback faded: the invalidated foundations of flagged
//!   positions
//! - contradiction/walkback borders: the flagging nodes and their targets
//!
//! The sets are pure functions of (nodes, edges, ratings) and are recomputed
//! in full on every committed mutation. No fade state is ever stored on the
//! nodes themselves, so ratings can change mid-session without staleness.

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use super::types::{DebateMap, Rating};

#[cfg(test)]
#[path = "invalidation_tests.rs"]
mod invalidation_tests;

/// Derived id-sets over the current map. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedSets {
    /// Settled nodes and their backward closures, minus protected nodes.
    pub faded_node_ids: HashSet<String>,
    /// Backward closures of contradicted positions, plus borders.
    pub contradiction_faded_ids: HashSet<String>,
    /// Backward closures of walked-back positions, plus borders.
    pub walkback_faded_ids: HashSet<String>,
    /// Contradiction-flagging nodes and the nodes they contradict.
    pub contradiction_border_ids: HashSet<String>,
    /// Walkback-flagging nodes and the nodes they narrow from.
    pub walkback_border_ids: HashSet<String>,
}

impl DerivedSets {
    /// True when an id appears in any of the three faded sets.
    pub fn is_invalidated(&self, id: &str) -> bool {
        self.faded_node_ids.contains(id)
            || self.contradiction_faded_ids.contains(id)
            || self.walkback_faded_ids.contains(id)
    }

    /// True when the id should render dimmed: in a faded set but not
    /// holding full opacity as a border node.
    pub fn is_dimmed(&self, id: &str) -> bool {
        self.is_invalidated(id)
            && !self.contradiction_border_ids.contains(id)
            && !self.walkback_border_ids.contains(id)
    }
}

/// Smallest superset of `seeds` closed under predecessors (backward
/// reachability against edge direction).
fn backward_closure<'a, I>(
    seeds: I,
    predecessors: &HashMap<&str, Vec<&str>>,
) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut closure: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for seed in seeds {
        if closure.insert(seed.to_string()) {
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        if let Some(preds) = predecessors.get(current) {
            for pred in preds {
                if closure.insert((*pred).to_string()) {
                    queue.push_back(pred);
                }
            }
        }
    }

    closure
}

/// Compute all derived sets for the given map. O(V+E).
pub fn derive(map: &DebateMap) -> DerivedSets {
    let predecessors = map.predecessor_index();

    // Step 1: agreed and retracted nodes fade together with everything
    // arguing for or against them.
    let settled: Vec<&str> = map
        .nodes
        .iter()
        .filter(|n| matches!(n.rating, Some(Rating::Up) | Some(Rating::Down)))
        .map(|n| n.id.as_str())
        .collect();
    let mut faded = backward_closure(settled.iter().copied(), &predecessors);

    // Step 2: backward closures of flagged positions.
    let contradiction_targets: HashSet<&str> = map
        .nodes
        .iter()
        .filter_map(|n| n.metadata.contradicts.as_deref())
        .collect();
    let walkback_targets: HashSet<&str> = map
        .nodes
        .iter()
        .filter_map(|n| n.metadata.moves_goalposts_from.as_deref())
        .collect();

    let mut contradiction_faded =
        backward_closure(contradiction_targets.iter().copied(), &predecessors);
    let mut walkback_faded = backward_closure(walkback_targets.iter().copied(), &predecessors);

    // Step 3: border sets hold the flagging node and its target. Borders
    // also join their faded set, but keep full opacity in presentation.
    let mut contradiction_border: HashSet<String> = HashSet::new();
    let mut walkback_border: HashSet<String> = HashSet::new();
    for node in &map.nodes {
        if let Some(target) = &node.metadata.contradicts {
            contradiction_border.insert(node.id.clone());
            contradiction_border.insert(target.clone());
        }
        if let Some(target) = &node.metadata.moves_goalposts_from {
            walkback_border.insert(node.id.clone());
            walkback_border.insert(target.clone());
        }
    }
    contradiction_faded.extend(contradiction_border.iter().cloned());
    walkback_faded.extend(walkback_border.iter().cloned());

    // Step 4: protection pass over the step-1 faded set. A flagging node
    // and its backward closure stay visible, unless the flagging node is
    // itself a contradiction/walkback target (mutual contradictions would
    // otherwise leave both subtrees permanently protected). Direct targets
    // of flagging nodes are always protected.
    let flagging: Vec<&str> = map
        .nodes
        .iter()
        .filter(|n| n.is_flagging())
        .map(|n| n.id.as_str())
        .collect();
    let flagged_targets: HashSet<&str> = contradiction_targets
        .union(&walkback_targets)
        .copied()
        .collect();

    let unflagged_flaggers = flagging
        .iter()
        .copied()
        .filter(|id| !flagged_targets.contains(id));
    let mut protected = backward_closure(unflagged_flaggers, &predecessors);
    for id in &flagging {
        protected.insert((*id).to_string());
    }
    for node in &map.nodes {
        if let Some(target) = &node.metadata.contradicts {
            protected.insert(target.clone());
        }
        if let Some(target) = &node.metadata.moves_goalposts_from {
            protected.insert(target.clone());
        }
    }
    faded.retain(|id| !protected.contains(id));

    debug!(
        faded = faded.len(),
        contradiction_faded = contradiction_faded.len(),
        walkback_faded = walkback_faded.len(),
        protected = protected.len(),
        "Derived invalidation sets"
    );

    DerivedSets {
        faded_node_ids: faded,
        contradiction_faded_ids: contradiction_faded,
        walkback_faded_ids: walkback_faded,
        contradiction_border_ids: contradiction_border,
        walkback_border_ids: walkback_border,
    }
}
