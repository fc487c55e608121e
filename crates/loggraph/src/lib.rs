#![forbid(unsafe_code)]

//! Visible projection of a large, immutable commit graph.
//!
//! `loggraph` turns a base graph (see [`base`]) into the rows a log view draws: hidden commits
//! are compressed out of the row space, linear runs of history can be folded into a single
//! edge, and selecting a commit highlights its ancestry.
//!
//! ```
//! use std::sync::Arc;
//! use loggraph::base::{BaseGraph, Flags, Layout};
//! use loggraph::{MutableGraph, ViewOptions};
//!
//! let base = BaseGraph::linear(6);
//! let layout = Layout::build(&base, &[]);
//! let all = Flags::new(base.node_count(), true);
//! let mut graph =
//!     MutableGraph::collapsible(Arc::new(base), Arc::new(layout), all, ViewOptions::default())
//!         .unwrap();
//!
//! let fragment = graph.long_down_fragment(0).unwrap().unwrap();
//! graph.collapse(fragment).unwrap();
//! assert_eq!(graph.node_count(), 2);
//! ```

pub use loggraph_core as base;

pub mod action;
pub mod element;
pub mod fragments;
pub mod mutable_graph;
pub mod options;
pub mod projection;
pub mod thick;

pub use action::{ActionResult, GraphAction};
pub use element::{Edge, EdgeType, Fragment, GraphElement, Node, NodeType};
pub use fragments::{FragmentGenerator, LinearChain};
pub use mutable_graph::MutableGraph;
pub use options::ViewOptions;
pub use projection::{HiddenEdges, ProjectedGraph, Projection};
pub use thick::ThickController;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
