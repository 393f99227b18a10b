//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod stats;

pub use arena::{LocationForest, TreeNode};
pub use builder::{build_forest, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use expansion::ExpansionState;
pub use filter::{apply, filter_roots, FilterCriteria};
pub use stats::AggregateStats;
