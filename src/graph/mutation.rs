//! Mutation application: wholesale map replacement and local rating toggles.
//!
//! Both paths produce a new map without touching the input. A replacement
//! that fails validation is rejected entirely so the caller keeps the
//! previous snapshot.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::types::{AgreedBy, DebateMap, Rating, Speaker};
use crate::error::{ValidationError, ValidationResult};

/// Validate an externally supplied replacement map.
///
/// Rejects duplicate node/edge ids, edges referencing unknown nodes, and
/// nodes with more than one outgoing edge (the support layer is a forest).
pub fn validate(map: &DebateMap) -> ValidationResult<()> {
    let mut node_ids: HashSet<&str> = HashSet::with_capacity(map.nodes.len());
    for node in &map.nodes {
        if node.id.is_empty() {
            return Err(ValidationError::MissingField {
                field: "node.id".to_string(),
            });
        }
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    let mut edge_ids: HashSet<&str> = HashSet::with_capacity(map.edges.len());
    let mut out_degree: HashMap<&str, u32> = HashMap::new();
    for edge in &map.edges {
        if edge.id.is_empty() {
            return Err(ValidationError::MissingField {
                field: "edge.id".to_string(),
            });
        }
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(ValidationError::DuplicateEdgeId {
                id: edge.id.clone(),
            });
        }
        for endpoint in [&edge.from, &edge.to] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(ValidationError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        let degree = out_degree.entry(edge.from.as_str()).or_insert(0);
        *degree += 1;
        if *degree > 1 {
            return Err(ValidationError::MultipleParents {
                node_id: edge.from.clone(),
            });
        }
    }

    Ok(())
}

/// Apply a full replacement map, validating its shape first.
pub fn apply_replacement(replacement: DebateMap) -> ValidationResult<DebateMap> {
    validate(&replacement)?;
    Ok(replacement)
}

/// Toggle a rating on one node, returning the new map.
///
/// Setting "up" records agreement by the current turn speaker; repeating the
/// same rating clears it along with `agreed_by`; "down" clears any
/// `agreed_by`. Up and down are mutually exclusive. An unknown node id is a
/// no-op.
pub fn toggle_rating(
    map: &DebateMap,
    node_id: &str,
    rating: Rating,
    turn_speaker: Speaker,
) -> DebateMap {
    let mut next = map.clone();
    let Some(node) = next.node_mut(node_id) else {
        debug!(node_id, "Rating toggle on unknown node, ignoring");
        return next;
    };

    if node.rating == Some(rating) {
        node.rating = None;
        node.metadata.agreed_by = None;
    } else {
        node.rating = Some(rating);
        node.metadata.agreed_by = match rating {
            Rating::Up => Some(AgreedBy {
                speaker: turn_speaker,
                excerpt: None,
            }),
            Rating::Down => None,
        };
    }

    next
}

/// Whether a rating toggle would change the map at all.
pub fn rating_applies(map: &DebateMap, node_id: &str) -> bool {
    map.node(node_id).is_some()
}
