//! Linear undo/redo history for a debate.
//!
//! A single-branch snapshot list with a cursor: `push` truncates any
//! redo-able future and appends, `undo`/`redo` only move the cursor. This is
//! deliberately not a branching undo tree.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::graph::{DebateMap, DerivedSets};

/// The analysis attached to a committed map: derived sets plus the
/// reasoner's baseline read of the debate for that turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    /// Invalidation sets derived from the map.
    pub derived: DerivedSets,
    /// Baseline leaning from the reasoner (-1..+1, negative favors SideA).
    pub baseline_leaning: f64,
    /// Reasoner's explanation of the baseline, if provided.
    pub leaning_reason: Option<String>,
    /// Reasoner's one-line read of SideA's argumentation style.
    pub style_a: Option<String>,
    /// Reasoner's one-line read of SideB's argumentation style.
    pub style_b: Option<String>,
}

/// One committed (map, analysis) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub map: DebateMap,
    pub analysis: Analysis,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot timestamped now.
    pub fn new(map: DebateMap, analysis: Analysis) -> Self {
        Self {
            map,
            analysis,
            created_at: Utc::now(),
        }
    }
}

/// Ordered snapshot list with a cursor. Always non-empty: it is seeded with
/// an initial snapshot so `current()` is total.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
}

impl History {
    /// Create a history seeded with the given initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.index]
    }

    /// Append a committed snapshot, discarding any redo-able future.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
    }

    /// Move the cursor back one entry. Total; a no-op at the start.
    /// Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor forward one entry. Total; a no-op at the end.
    /// Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Whether undo would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether redo would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries, including the seed snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; the seed snapshot always remains.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::new(DebateMap::default(), Analysis::default()))
    }
}
