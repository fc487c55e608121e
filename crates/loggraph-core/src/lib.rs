#![forbid(unsafe_code)]

//! Immutable commit-graph storage and the index structures `loggraph` projects it through.
//!
//! Everything here is addressed by *real* node index: the dense `0..N` position of a commit in
//! the already laid out base graph.

pub mod branches;
pub mod dfs;
pub mod error;
pub mod flags;
pub mod graph;
pub mod index_map;
pub mod layout;

pub use branches::branch_visibility;
pub use dfs::Dfs;
pub use error::{Error, Result};
pub use flags::{Flags, GraphFlags};
pub use graph::{BaseGraph, CommitRecord};
pub use index_map::VisibleIndexMap;
pub use layout::Layout;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Index sentinel for an edge whose target lies outside the loaded part of the history.
pub const NOT_LOADED: usize = usize::MAX;
