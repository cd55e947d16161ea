//! Argument-graph data model.
//!
//! A debate map is an ordered node list plus an edge list. The
//! support/oppose/rebut/clarify edges form a forest (at most one outgoing
//! edge per node); the `contradicts`/`moves_goalposts_from` annotations are
//! a separate, sparser overlay over the same id space and are never mixed
//! into the edge adjacency.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A debate participant or the moderator annotation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The first debate participant.
    SideA,
    /// The second debate participant.
    SideB,
    /// Non-participant annotation source.
    Moderator,
}

impl Speaker {
    /// The opposing participant. The moderator has no opponent and maps to
    /// itself.
    pub fn opponent(&self) -> Speaker {
        match self {
            Speaker::SideA => Speaker::SideB,
            Speaker::SideB => Speaker::SideA,
            Speaker::Moderator => Speaker::Moderator,
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::SideA => write!(f, "side_a"),
            Speaker::SideB => write!(f, "side_b"),
            Speaker::Moderator => write!(f, "moderator"),
        }
    }
}

/// Kind of statement a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Claim,
    Premise,
    Evidence,
    Objection,
    Rebuttal,
    Clarification,
}

/// Local rating applied to a node. Absence of a rating means "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// The node was agreed upon by the opposing side.
    Up,
    /// The node was retracted by its author.
    Down,
}

/// Relationship carried by a support/attack edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Supports,
    StronglySupports,
    Opposes,
    Refutes,
    Clarifies,
    Rebuts,
}

/// Record of who agreed with a node, with an optional quoted excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreedBy {
    pub speaker: Speaker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Reasoner-maintained annotations on a node.
///
/// Content and metadata may be amended in place on later turns (tactics are
/// re-evaluated every turn); id and speaker are immutable for the node's
/// lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Reasoner confidence in the statement (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Free-form topic tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Rhetorical tactics detected on this statement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tactics: Vec<String>,
    /// Explanation per detected tactic.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tactic_reasons: HashMap<String, String>,
    /// Set when the opposing side rated this node "up".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_by: Option<AgreedBy>,
    /// Id of an earlier same-speaker node this statement contradicts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contradicts: Option<String>,
    /// Id of an earlier same-speaker node this statement quietly narrows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves_goalposts_from: Option<String>,
}

/// One atomic statement in the argument graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentNode {
    /// Unique id, stable for the node's lifetime.
    pub id: String,
    /// Who made the statement. Immutable.
    pub speaker: Speaker,
    /// What kind of statement this is.
    pub kind: NodeKind,
    /// The statement text.
    pub content: String,
    /// Local rating, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Reasoner annotations.
    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl ArgumentNode {
    /// Create a node with no rating and empty metadata.
    pub fn new(
        id: impl Into<String>,
        speaker: Speaker,
        kind: NodeKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            speaker,
            kind,
            content: content.into(),
            rating: None,
            metadata: NodeMetadata::default(),
        }
    }

    /// Set the reasoner confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.metadata.confidence = Some(confidence);
        self
    }

    /// Mark this node as contradicting an earlier node.
    pub fn with_contradicts(mut self, target: impl Into<String>) -> Self {
        self.metadata.contradicts = Some(target.into());
        self
    }

    /// Mark this node as moving the goalposts from an earlier node.
    pub fn with_walkback(mut self, target: impl Into<String>) -> Self {
        self.metadata.moves_goalposts_from = Some(target.into());
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// True when this node flags a contradiction or walkback on another node.
    pub fn is_flagging(&self) -> bool {
        self.metadata.contradicts.is_some() || self.metadata.moves_goalposts_from.is_some()
    }
}

/// A support/attack edge from one node to its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentEdge {
    /// Unique edge id.
    pub id: String,
    /// The supporting/attacking node.
    pub from: String,
    /// The target node.
    pub to: String,
    /// How `from` relates to `to`.
    pub relationship: Relationship,
}

impl ArgumentEdge {
    /// Create a new edge.
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        relationship: Relationship,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            relationship,
        }
    }
}

/// The authoritative debate map: ordered nodes, edges, title and description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebateMap {
    // Required on the wire; a payload without them is malformed.
    pub nodes: Vec<ArgumentNode>,
    pub edges: Vec<ArgumentEdge>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl DebateMap {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&ArgumentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node by id, mutably.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut ArgumentNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The outgoing edge of a node, if any. The forest invariant guarantees
    /// at most one.
    pub fn outgoing_edge(&self, node_id: &str) -> Option<&ArgumentEdge> {
        self.edges.iter().find(|e| e.from == node_id)
    }

    /// Ids of root nodes (no outgoing edge), in node order.
    pub fn root_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| self.outgoing_edge(&n.id).is_none())
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Predecessor index: target id -> ids of nodes whose outgoing edge
    /// points at it, in edge order. Built once per recomputation.
    pub fn predecessor_index(&self) -> HashMap<&str, Vec<&str>> {
        let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            index.entry(edge.to.as_str()).or_default().push(edge.from.as_str());
        }
        index
    }

    /// Count of nodes owned by a speaker.
    pub fn node_count_for(&self, speaker: Speaker) -> usize {
        self.nodes.iter().filter(|n| n.speaker == speaker).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> DebateMap {
        DebateMap {
            nodes: vec![
                ArgumentNode::new("c1", Speaker::SideA, NodeKind::Claim, "claim"),
                ArgumentNode::new("p1", Speaker::SideA, NodeKind::Premise, "premise"),
                ArgumentNode::new("o1", Speaker::SideB, NodeKind::Objection, "objection"),
            ],
            edges: vec![
                ArgumentEdge::new("e1", "p1", "c1", Relationship::Supports),
                ArgumentEdge::new("e2", "o1", "c1", Relationship::Opposes),
            ],
            title: "sample".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_speaker_opponent() {
        assert_eq!(Speaker::SideA.opponent(), Speaker::SideB);
        assert_eq!(Speaker::SideB.opponent(), Speaker::SideA);
        assert_eq!(Speaker::Moderator.opponent(), Speaker::Moderator);
    }

    #[test]
    fn test_root_ids() {
        let map = sample_map();
        assert_eq!(map.root_ids(), vec!["c1"]);
    }

    #[test]
    fn test_predecessor_index() {
        let map = sample_map();
        let index = map.predecessor_index();
        assert_eq!(index.get("c1"), Some(&vec!["p1", "o1"]));
        assert!(index.get("p1").is_none());
    }

    #[test]
    fn test_outgoing_edge() {
        let map = sample_map();
        assert_eq!(map.outgoing_edge("p1").unwrap().to, "c1");
        assert!(map.outgoing_edge("c1").is_none());
    }

    #[test]
    fn test_node_count_for() {
        let map = sample_map();
        assert_eq!(map.node_count_for(Speaker::SideA), 2);
        assert_eq!(map.node_count_for(Speaker::SideB), 1);
        assert_eq!(map.node_count_for(Speaker::Moderator), 0);
    }

    #[test]
    fn test_is_flagging() {
        let plain = ArgumentNode::new("n", Speaker::SideA, NodeKind::Claim, "x");
        assert!(!plain.is_flagging());

        let contradicting = plain.clone().with_contradicts("m");
        assert!(contradicting.is_flagging());

        let walkback = plain.with_walkback("m");
        assert!(walkback.is_flagging());
    }

    #[test]
    fn test_serde_round_trip_snake_case() {
        let map = sample_map();
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"side_a\""));
        assert!(json.contains("\"supports\""));

        let back: DebateMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_deserialize_defaults_missing_optional_fields() {
        let json = r#"{
            "nodes": [
                {"id": "n1", "speaker": "side_a", "kind": "claim", "content": "x"}
            ],
            "edges": [],
            "title": "t",
            "description": ""
        }"#;
        let map: DebateMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.nodes[0].rating, None);
        assert!(map.nodes[0].metadata.tags.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_missing_collections() {
        let result: Result<DebateMap, _> = serde_json::from_str(r#"{"title": "t"}"#);
        assert!(result.is_err());
    }
}
