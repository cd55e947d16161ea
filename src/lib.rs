//! # Debate Graph Engine
//!
//! Core engine for two-party debates mapped into a directed graph of
//! claims, premises, evidence, objections, rebuttals and clarifications by
//! an external reasoning collaborator.
//!
//! ## Features
//!
//! - **Graph Store & Mutation Application**: validated wholesale map
//!   replacement and local rating toggles
//! - **Invalidation Propagation**: backward-reachability fade sets with a
//!   protection pass for contradictions and walkbacks
//! - **Spanning-Tree Projection**: DAG-to-forest conversion for list
//!   display with cross-link tracking and collapse state
//! - **Leaning Adjustment**: baseline "who is winning" score blended with
//!   locally observed invalidation
//! - **Linear History**: single-branch undo/redo over committed snapshots
//!
//! ## Architecture
//!
//! ```text
//! Caller → DebateEngine → Reasoning service (HTTP)
//!               ↓
//!   History of (map, analysis) snapshots (in-memory)
//! ```
//!
//! Layout geometry, colors, animation and network transport are external
//! concerns; the engine serves a read-only projection and nothing more.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use debate_graph_engine::{Config, DebateEngine, Speaker};
//! use debate_graph_engine::reasoner::ReasonerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let reasoner = ReasonerClient::new(
//!         &config.reasoner,
//!         config.request.clone(),
//!         config.pipes.clone(),
//!     )?;
//!     let engine = DebateEngine::new(Arc::new(reasoner), config.engine.clone());
//!     engine.submit_statement(Speaker::SideA, "Tabs beat spaces.").await?;
//!     for row in engine.rows() {
//!         println!("{:indent$}{}", "", row.node_id, indent = row.depth * 2);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management for the engine and its reasoning service.
pub mod config;
/// Debate engine orchestration: submissions, ratings, undo/redo, views.
pub mod engine;
/// Error types and result aliases for the application.
pub mod error;
/// Argument-graph data model and derivation layer.
pub mod graph;
/// Linear undo/redo history of committed snapshots.
pub mod history;
/// System prompts for the reasoning-service pipes.
pub mod prompts;
/// Reasoning-service client and payload types.
pub mod reasoner;

pub use config::Config;
pub use engine::{DebateEngine, InstructionOutcome, RenderView, SubmitOutcome};
pub use error::{AppError, AppResult};
pub use graph::{DebateMap, DerivedSets, Rating, Speaker};
