//! Tests for invalidation propagation.

use super::*;
use crate::graph::types::{ArgumentEdge, ArgumentNode, NodeKind, Relationship, Speaker};
use pretty_assertions::assert_eq;

fn node(id: &str, speaker: Speaker, kind: NodeKind) -> ArgumentNode {
    ArgumentNode::new(id, speaker, kind, format!("content of {}", id))
}

fn supports(id: &str, from: &str, to: &str) -> ArgumentEdge {
    ArgumentEdge::new(id, from, to, Relationship::Supports)
}

/// C1 (claim, SideA) <- P1 (premise, supports) and <- O1 (objection, opposes).
fn basic_map() -> DebateMap {
    DebateMap {
        nodes: vec![
            node("c1", Speaker::SideA, NodeKind::Claim),
            node("p1", Speaker::SideA, NodeKind::Premise),
            node("o1", Speaker::SideB, NodeKind::Objection),
        ],
        edges: vec![
            supports("e1", "p1", "c1"),
            ArgumentEdge::new("e2", "o1", "c1", Relationship::Opposes),
        ],
        ..Default::default()
    }
}

/// A1 contradicts B1, B1 contradicts A1, A2 supports A1, B2 supports B1.
fn mutual_contradiction_map() -> DebateMap {
    DebateMap {
        nodes: vec![
            node("a1", Speaker::SideA, NodeKind::Claim).with_contradicts("b1"),
            node("b1", Speaker::SideB, NodeKind::Claim).with_contradicts("a1"),
            node("a2", Speaker::SideA, NodeKind::Premise),
            node("b2", Speaker::SideB, NodeKind::Premise),
        ],
        edges: vec![supports("e1", "a2", "a1"), supports("e2", "b2", "b1")],
        ..Default::default()
    }
}

fn set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty_map_yields_empty_sets() {
    let sets = derive(&DebateMap::default());
    assert_eq!(sets, DerivedSets::default());
}

#[test]
fn test_no_ratings_no_flags_yields_empty_sets() {
    let sets = derive(&basic_map());
    assert!(sets.faded_node_ids.is_empty());
    assert!(sets.contradiction_faded_ids.is_empty());
    assert!(sets.walkback_faded_ids.is_empty());
}

#[test]
fn test_agreement_fades_ancestors_not_descendants() {
    // After SideB agrees with P1, only P1 fades; C1 stays visible because
    // closure runs against edge direction.
    let mut map = basic_map();
    map.node_mut("p1").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert_eq!(sets.faded_node_ids, set(&["p1"]));
}

#[test]
fn test_agreement_on_target_fades_its_supporters() {
    let mut map = basic_map();
    map.node_mut("c1").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert_eq!(sets.faded_node_ids, set(&["c1", "p1", "o1"]));
}

#[test]
fn test_retraction_fades_same_as_agreement() {
    // Retracting a conclusion fades the reasons offered for it as well;
    // both ratings settle the node and its supporting substructure.
    let mut map = basic_map();
    map.node_mut("c1").unwrap().rating = Some(Rating::Down);

    let sets = derive(&map);
    assert_eq!(sets.faded_node_ids, set(&["c1", "p1", "o1"]));
}

#[test]
fn test_closure_follows_chains() {
    // p2 -> p1 -> c1; agreeing with c1 fades the whole chain.
    let mut map = basic_map();
    map.nodes.push(node("p2", Speaker::SideA, NodeKind::Evidence));
    map.edges.push(supports("e3", "p2", "p1"));
    map.node_mut("c1").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert_eq!(sets.faded_node_ids, set(&["c1", "p1", "p2", "o1"]));
}

#[test]
fn test_idempotent_on_identical_input() {
    let mut map = basic_map();
    map.node_mut("c1").unwrap().rating = Some(Rating::Up);

    let first = derive(&map);
    let second = derive(&map);
    assert_eq!(first, second);
}

#[test]
fn test_contradiction_borders_and_faded() {
    let mut map = basic_map();
    map.nodes
        .push(node("r1", Speaker::SideB, NodeKind::Rebuttal).with_contradicts("c1"));

    let sets = derive(&map);
    assert_eq!(sets.contradiction_border_ids, set(&["r1", "c1"]));
    // Closure of the contradicted position plus the borders.
    assert_eq!(
        sets.contradiction_faded_ids,
        set(&["c1", "p1", "o1", "r1"])
    );
    assert!(sets.walkback_border_ids.is_empty());
}

#[test]
fn test_walkback_borders_and_faded() {
    let mut map = basic_map();
    map.nodes
        .push(node("w1", Speaker::SideA, NodeKind::Clarification).with_walkback("c1"));

    let sets = derive(&map);
    assert_eq!(sets.walkback_border_ids, set(&["w1", "c1"]));
    assert_eq!(sets.walkback_faded_ids, set(&["c1", "p1", "o1", "w1"]));
    assert!(sets.contradiction_border_ids.is_empty());
}

#[test]
fn test_border_nodes_keep_full_opacity() {
    let mut map = basic_map();
    map.nodes
        .push(node("r1", Speaker::SideB, NodeKind::Rebuttal).with_contradicts("c1"));

    let sets = derive(&map);
    assert!(sets.is_invalidated("r1"));
    assert!(!sets.is_dimmed("r1"));
    assert!(!sets.is_dimmed("c1"));
    // Plain closure members are dimmed.
    assert!(sets.is_dimmed("p1"));
}

#[test]
fn test_flagging_node_closure_is_protected() {
    // r1 contradicts c1, s1 supports r1. Agreeing with r1 would fade r1 and
    // s1, but both sit in a flagging node's protected closure.
    let mut map = basic_map();
    map.nodes
        .push(node("r1", Speaker::SideB, NodeKind::Rebuttal).with_contradicts("c1"));
    map.nodes.push(node("s1", Speaker::SideB, NodeKind::Evidence));
    map.edges.push(supports("e3", "s1", "r1"));
    map.node_mut("r1").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert!(sets.faded_node_ids.is_empty());
}

#[test]
fn test_flagged_target_is_protected_from_fading() {
    // Agreeing with c1 fades c1's closure, but c1 is the direct target of a
    // flagging node and always stays visible.
    let mut map = basic_map();
    map.nodes
        .push(node("r1", Speaker::SideB, NodeKind::Rebuttal).with_contradicts("c1"));
    map.node_mut("c1").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert!(!sets.faded_node_ids.contains("c1"));
    // Supporters of c1 are not flagging nodes and still fade.
    assert!(sets.faded_node_ids.contains("p1"));
}

#[test]
fn test_mutual_contradiction_borders() {
    let sets = derive(&mutual_contradiction_map());
    assert_eq!(sets.contradiction_border_ids, set(&["a1", "b1"]));
    // Closures of both positions are contradiction-faded.
    assert_eq!(
        sets.contradiction_faded_ids,
        set(&["a1", "a2", "b1", "b2"])
    );
}

#[test]
fn test_mutual_contradiction_breaks_protection_deadlock() {
    // Both flagging nodes are themselves contradiction targets, so neither
    // closure is protected: agreed supporters fade on both sides.
    let mut map = mutual_contradiction_map();
    map.node_mut("a2").unwrap().rating = Some(Rating::Up);
    map.node_mut("b2").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    assert!(sets.faded_node_ids.contains("a2"));
    assert!(sets.faded_node_ids.contains("b2"));
    // The flagging nodes themselves remain protected.
    assert!(!sets.faded_node_ids.contains("a1"));
    assert!(!sets.faded_node_ids.contains("b1"));
}

#[test]
fn test_one_sided_contradiction_keeps_protection() {
    // Without mutuality the flagging node's closure stays visible.
    let mut map = mutual_contradiction_map();
    map.node_mut("b1").unwrap().metadata.contradicts = None;
    map.node_mut("a2").unwrap().rating = Some(Rating::Up);

    let sets = derive(&map);
    // a2 supports a1, a flagging node that nobody has contradicted.
    assert!(!sets.faded_node_ids.contains("a2"));
}

#[test]
fn test_overlay_does_not_use_support_edges() {
    // Contradiction closure must ignore the overlay itself: flagging r1
    // towards c1 does not pull r1's own supporters into the contradiction
    // closure unless they support c1.
    let mut map = basic_map();
    map.nodes
        .push(node("r1", Speaker::SideB, NodeKind::Rebuttal).with_contradicts("c1"));
    map.nodes.push(node("s1", Speaker::SideB, NodeKind::Evidence));
    map.edges.push(supports("e3", "s1", "r1"));

    let sets = derive(&map);
    assert!(!sets.contradiction_faded_ids.contains("s1"));
}
