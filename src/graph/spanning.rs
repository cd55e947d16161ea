//! Spanning-tree projection for list display.
//!
//! Flattens the forest-shaped support graph into a rooted forest without
//! losing multi-parent information: each node is placed exactly once under
//! the first parent through which it is reached, and any additional parent
//! link increments a cross-link count on the canonical placement. The
//! projection is a pure, order-stable function of (nodes, edges,
//! collapse-state).

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::types::DebateMap;

/// One placed node in the projected forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEntry {
    /// The placed node's id.
    pub node_id: String,
    /// Depth in the forest; roots are 0.
    pub depth: usize,
    /// Number of additional parents beyond the canonical placement.
    pub cross_link_count: usize,
    /// Client-toggled collapse state for this node.
    pub collapsed: bool,
    /// Total descendants beneath the canonical placement.
    pub descendant_count: usize,
    /// Children placed under this node.
    pub children: Vec<TreeEntry>,
}

/// A row in the flattened, indentable list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow {
    pub node_id: String,
    pub depth: usize,
    pub cross_link_count: usize,
    pub collapsed: bool,
    pub descendant_count: usize,
}

/// Project the map into a rooted forest.
///
/// Roots are nodes with no outgoing edge, in node order. Children of a node
/// are its predecessors (the nodes supporting or attacking it), in edge
/// order. Nodes unreachable from any root are placed as their own roots in
/// a final sweep.
///
/// Panics if an edge references a node missing from the map; callers run
/// validation first, so that is a programming error rather than user input.
pub fn project(map: &DebateMap, collapsed: &HashSet<String>) -> Vec<TreeEntry> {
    let predecessors = map.predecessor_index();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut cross_links: HashMap<&str, usize> = HashMap::new();

    let mut forest: Vec<TreeEntry> = Vec::new();
    for root in map.root_ids() {
        forest.push(place(
            root,
            0,
            map,
            &predecessors,
            collapsed,
            &mut placed,
            &mut cross_links,
        ));
    }

    // Defensive sweep: the single-parent invariant means every node should
    // be reachable from a root, but a cyclic component would not be.
    for node in &map.nodes {
        if !placed.contains(node.id.as_str()) {
            forest.push(place(
                &node.id,
                0,
                map,
                &predecessors,
                collapsed,
                &mut placed,
                &mut cross_links,
            ));
        }
    }

    apply_cross_links(&mut forest, &cross_links);
    forest
}

fn place<'a>(
    id: &str,
    depth: usize,
    map: &'a DebateMap,
    predecessors: &HashMap<&'a str, Vec<&'a str>>,
    collapsed: &HashSet<String>,
    placed: &mut HashSet<&'a str>,
    cross_links: &mut HashMap<&'a str, usize>,
) -> TreeEntry {
    let node = map
        .node(id)
        .unwrap_or_else(|| panic!("edge references node missing from map: {}", id));
    placed.insert(node.id.as_str());

    let mut children = Vec::new();
    if let Some(preds) = predecessors.get(id) {
        for child in preds {
            if placed.contains(*child) {
                // Already placed through another path; count the extra link
                // on the canonical placement.
                *cross_links.entry(*child).or_insert(0) += 1;
            } else {
                children.push(place(
                    child,
                    depth + 1,
                    map,
                    predecessors,
                    collapsed,
                    placed,
                    cross_links,
                ));
            }
        }
    }

    let descendant_count = children
        .iter()
        .map(|c| 1 + c.descendant_count)
        .sum::<usize>();

    TreeEntry {
        node_id: node.id.clone(),
        depth,
        cross_link_count: 0,
        collapsed: collapsed.contains(id),
        descendant_count,
        children,
    }
}

fn apply_cross_links(entries: &mut [TreeEntry], cross_links: &HashMap<&str, usize>) {
    for entry in entries {
        if let Some(count) = cross_links.get(entry.node_id.as_str()) {
            entry.cross_link_count = *count;
        }
        apply_cross_links(&mut entry.children, cross_links);
    }
}

/// Flatten the forest into the indentable list order (pre-order). Children
/// of a collapsed entry are elided; its descendant count tells the consumer
/// how many rows were hidden.
pub fn flatten(forest: &[TreeEntry]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for entry in forest {
        flatten_into(entry, &mut rows);
    }
    rows
}

fn flatten_into(entry: &TreeEntry, rows: &mut Vec<TreeRow>) {
    rows.push(TreeRow {
        node_id: entry.node_id.clone(),
        depth: entry.depth,
        cross_link_count: entry.cross_link_count,
        collapsed: entry.collapsed,
        descendant_count: entry.descendant_count,
    });
    if !entry.collapsed {
        for child in &entry.children {
            flatten_into(child, rows);
        }
    }
}
