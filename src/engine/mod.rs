//! Debate engine: one instance owns one debate.
//!
//! The engine wires the mutation applicator, invalidation propagator,
//! leaning adjuster and history manager together around the single
//! asynchronous boundary, the reasoning-service call. Mutations commit
//! atomically: either the full replacement merges and exactly one history
//! entry is pushed, or the store is left unchanged and the caller retries
//! with its original input.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult, ValidationError};
use crate::graph::{
    self, invalidation, leaning, mutation, spanning, ArgumentEdge, ArgumentNode, DebateMap,
    DerivedSets, Rating, Speaker, TreeEntry, TreeRow,
};
use crate::history::{Analysis, History, Snapshot};
use crate::reasoner::{
    AnalyzeRequest, ChatPayload, Message, ModerateRequest, ReasoningService,
};

/// Outcome of an asynchronous submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The mutation was merged and one history entry pushed.
    Committed {
        /// Displayed leaning after the commit.
        leaning: f64,
        /// Node count of the committed map.
        node_count: usize,
    },
    /// The response arrived after a reset or a newer submission and was
    /// discarded; the store is unchanged.
    Superseded,
}

/// Outcome of a moderator instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionOutcome {
    /// The moderator replied; `map_updated` is true when a corrective
    /// replacement map was applied (and one history entry pushed).
    Replied { reply: String, map_updated: bool },
    /// The response arrived after a reset or a newer submission and was
    /// discarded.
    Superseded,
}

/// Read-only projection for a rendering surface. The core has no dependency
/// on the consumer; it only serves this view.
#[derive(Debug, Clone)]
pub struct RenderView {
    pub title: String,
    pub description: String,
    pub nodes: Vec<ArgumentNode>,
    pub edges: Vec<ArgumentEdge>,
    pub derived: DerivedSets,
    /// Displayed leaning: baseline blended with observed invalidation.
    pub leaning: f64,
    pub leaning_reason: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    /// True while a submission is outstanding.
    pub busy: bool,
}

struct EngineState {
    history: History,
    collapsed: HashSet<String>,
    transcript: Vec<Message>,
    turn_speaker: Speaker,
    /// Monotonically increasing submission token; last-submission-wins.
    submission_seq: u64,
    in_flight: bool,
}

impl EngineState {
    fn new() -> Self {
        Self {
            history: History::default(),
            collapsed: HashSet::new(),
            transcript: Vec::new(),
            turn_speaker: Speaker::SideA,
            submission_seq: 0,
            in_flight: false,
        }
    }

    fn current_map(&self) -> &DebateMap {
        &self.history.current().map
    }

    fn current_analysis(&self) -> &Analysis {
        &self.history.current().analysis
    }
}

/// Engine for a single debate. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DebateEngine {
    session_id: Uuid,
    reasoner: Arc<dyn ReasoningService>,
    config: EngineConfig,
    state: Arc<Mutex<EngineState>>,
}

impl DebateEngine {
    /// Create an engine over the given reasoning service.
    pub fn new(reasoner: Arc<dyn ReasoningService>, config: EngineConfig) -> Self {
        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, "Debate engine created");
        Self {
            session_id,
            reasoner,
            config,
            state: Arc::new(Mutex::new(EngineState::new())),
        }
    }

    /// This debate's session id.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        // Lock is never held across an await; poisoning can only come from
        // a panic in a pure section, where the state is still consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Submit one side's statement for analysis.
    ///
    /// Rejects synchronously when a submission is already outstanding. On
    /// success the replacement map is validated and committed atomically
    /// with exactly one history push; on failure the store is unchanged and
    /// the caller may retry with its original input. A response that
    /// arrives after a reset or a newer submission is discarded.
    pub async fn submit_statement(
        &self,
        speaker: Speaker,
        statement: &str,
    ) -> AppResult<SubmitOutcome> {
        if statement.trim().is_empty() {
            return Err(ValidationError::EmptyStatement.into());
        }

        let (token, current_map) = {
            let mut state = self.state();
            if state.in_flight {
                return Err(AppError::ConcurrentSubmission);
            }
            state.submission_seq += 1;
            state.in_flight = true;
            (state.submission_seq, state.current_map().clone())
        };

        debug!(
            session_id = %self.session_id,
            speaker = %speaker,
            token,
            "Submitting statement for analysis"
        );

        let request = AnalyzeRequest {
            current_map,
            speaker,
            statement: statement.to_string(),
        };
        let result = self.reasoner.analyze(request).await;

        let mut state = self.state();
        if state.submission_seq != token {
            // Reset or superseded while the call was outstanding; the
            // in-flight flag now belongs to someone else.
            warn!(
                session_id = %self.session_id,
                token,
                current = state.submission_seq,
                "Discarding late analyze response"
            );
            return Ok(SubmitOutcome::Superseded);
        }
        state.in_flight = false;

        let payload = result?;
        let map = mutation::apply_replacement(payload.map)?;

        let previous = state.current_analysis();
        let analysis = match payload.baseline {
            Some(baseline) => Analysis {
                derived: invalidation::derive(&map),
                baseline_leaning: baseline.leaning,
                leaning_reason: baseline.leaning_reason,
                style_a: baseline.style_a,
                style_b: baseline.style_b,
            },
            // No baseline this turn: carry the previous one forward.
            None => Analysis {
                derived: invalidation::derive(&map),
                baseline_leaning: previous.baseline_leaning,
                leaning_reason: previous.leaning_reason.clone(),
                style_a: previous.style_a.clone(),
                style_b: previous.style_b.clone(),
            },
        };

        let displayed = leaning::adjusted_leaning(
            analysis.baseline_leaning,
            &map,
            &analysis.derived,
            self.config.leaning_weight,
        );
        let node_count = map.nodes.len();

        state.history.push(Snapshot::new(map, analysis));
        state.turn_speaker = speaker.opponent();

        info!(
            session_id = %self.session_id,
            speaker = %speaker,
            node_count,
            leaning = displayed,
            "Statement committed"
        );

        Ok(SubmitOutcome::Committed {
            leaning: displayed,
            node_count,
        })
    }

    /// Send a moderator instruction over the chat channel.
    ///
    /// Shares the single-submission-in-flight rule with
    /// [`submit_statement`](Self::submit_statement). A corrective map in the
    /// reply is validated identically and applied atomically with one push.
    pub async fn send_instruction(&self, instruction: &str) -> AppResult<InstructionOutcome> {
        if instruction.trim().is_empty() {
            return Err(ValidationError::EmptyStatement.into());
        }

        let (token, request) = {
            let mut state = self.state();
            if state.in_flight {
                return Err(AppError::ConcurrentSubmission);
            }
            state.submission_seq += 1;
            state.in_flight = true;
            let request = ModerateRequest {
                instruction: instruction.to_string(),
                transcript: state.transcript.clone(),
                current_map: state.current_map().clone(),
            };
            (state.submission_seq, request)
        };

        let result = self.reasoner.moderate(request).await;

        let mut state = self.state();
        if state.submission_seq != token {
            warn!(
                session_id = %self.session_id,
                token,
                current = state.submission_seq,
                "Discarding late moderator response"
            );
            return Ok(InstructionOutcome::Superseded);
        }
        state.in_flight = false;

        let ChatPayload { reply, map } = result?;

        let map_updated = match map {
            Some(replacement) => {
                let map = mutation::apply_replacement(replacement)?;
                let analysis = Analysis {
                    derived: invalidation::derive(&map),
                    ..state.current_analysis().clone()
                };
                state.history.push(Snapshot::new(map, analysis));
                true
            }
            None => false,
        };

        state.transcript.push(Message::user(instruction));
        state.transcript.push(Message::assistant(&reply));

        info!(
            session_id = %self.session_id,
            map_updated,
            "Moderator instruction handled"
        );

        Ok(InstructionOutcome::Replied { reply, map_updated })
    }

    /// Toggle a rating on a node. Local and synchronous; commits one
    /// history entry. An unknown node id is a no-op and pushes nothing.
    pub fn rate_node(&self, node_id: &str, rating: Rating) -> bool {
        let mut state = self.state();
        if !mutation::rating_applies(state.current_map(), node_id) {
            debug!(
                session_id = %self.session_id,
                node_id,
                "Rating on unknown node ignored"
            );
            return false;
        }

        let map = mutation::toggle_rating(
            state.current_map(),
            node_id,
            rating,
            state.turn_speaker,
        );
        let analysis = Analysis {
            derived: invalidation::derive(&map),
            ..state.current_analysis().clone()
        };
        state.history.push(Snapshot::new(map, analysis));

        info!(
            session_id = %self.session_id,
            node_id,
            ?rating,
            "Rating committed"
        );
        true
    }

    /// Step back one committed mutation. Total; false at the start.
    pub fn undo(&self) -> bool {
        self.state().history.undo()
    }

    /// Step forward one committed mutation. Total; false at the end.
    pub fn redo(&self) -> bool {
        self.state().history.redo()
    }

    /// Toggle the collapse state of a node in the projected forest.
    /// Collapse state is presentation-local and not part of history.
    pub fn toggle_collapsed(&self, node_id: &str) {
        let mut state = self.state();
        if !state.collapsed.remove(node_id) {
            state.collapsed.insert(node_id.to_string());
        }
    }

    /// Project the current map into a rooted forest for list display.
    pub fn tree(&self) -> Vec<TreeEntry> {
        let state = self.state();
        spanning::project(state.current_map(), &state.collapsed)
    }

    /// The flattened, indentable list view of the current map.
    pub fn rows(&self) -> Vec<TreeRow> {
        graph::flatten(&self.tree())
    }

    /// Displayed leaning for the current snapshot, derived on read.
    pub fn current_leaning(&self) -> f64 {
        let state = self.state();
        let analysis = state.current_analysis();
        leaning::adjusted_leaning(
            analysis.baseline_leaning,
            state.current_map(),
            &analysis.derived,
            self.config.leaning_weight,
        )
    }

    /// Read-only projection of the current snapshot for rendering.
    pub fn view(&self) -> RenderView {
        let state = self.state();
        let map = state.current_map();
        let analysis = state.current_analysis();
        RenderView {
            title: map.title.clone(),
            description: map.description.clone(),
            nodes: map.nodes.clone(),
            edges: map.edges.clone(),
            derived: analysis.derived.clone(),
            leaning: leaning::adjusted_leaning(
                analysis.baseline_leaning,
                map,
                &analysis.derived,
                self.config.leaning_weight,
            ),
            leaning_reason: analysis.leaning_reason.clone(),
            can_undo: state.history.can_undo(),
            can_redo: state.history.can_redo(),
            busy: state.in_flight,
        }
    }

    /// Whose turn it is, used when attributing agreement on rating "up".
    pub fn turn_speaker(&self) -> Speaker {
        self.state().turn_speaker
    }

    /// Number of history entries, including the empty seed.
    pub fn history_len(&self) -> usize {
        self.state().history.len()
    }

    /// Discard the debate and start over. Any outstanding submission's
    /// response will be discarded when it arrives.
    pub fn reset(&self) {
        let mut state = self.state();
        state.submission_seq += 1;
        state.in_flight = false;
        state.history = History::default();
        state.collapsed.clear();
        state.transcript.clear();
        state.turn_speaker = Speaker::SideA;
        info!(session_id = %self.session_id, "Debate reset");
    }
}
