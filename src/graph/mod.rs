//! Argument-graph domain: data model and the derivation layer over it.
//!
//! - [`types`]: nodes, edges, and the debate map
//! - [`mutation`]: replacement and rating-toggle application with validation
//! - [`invalidation`]: backward-reachability fade/contradiction/walkback sets
//! - [`spanning`]: DAG-to-forest projection for list display
//! - [`leaning`]: baseline score blended with observed invalidation
//!
//! Everything in this module is synchronous, pure, and derive-on-read:
//! identical (nodes, edges, ratings) input always yields identical output.

pub mod invalidation;
pub mod leaning;
pub mod mutation;
pub mod spanning;
pub mod types;

pub use invalidation::{derive, DerivedSets};
pub use leaning::{adjusted_leaning, effectiveness, DEFAULT_ADJUSTMENT_WEIGHT};
pub use mutation::{apply_replacement, toggle_rating, validate};
pub use spanning::{flatten, project, TreeEntry, TreeRow};
pub use types::{
    AgreedBy, ArgumentEdge, ArgumentNode, DebateMap, NodeKind, NodeMetadata, Rating, Relationship,
    Speaker,
};
