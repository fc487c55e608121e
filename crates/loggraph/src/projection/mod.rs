//! Visible projections of the base graph.
//!
//! A projection decides which real indices are visible and how the neighbor lists of visible
//! nodes look. There are three fixed variants:
//!
//! - [`Projection::Passthrough`]: everything visible, base adjacency as-is.
//! - [`Projection::Filtered`]: nodes failing a predicate or the branch filter are dropped from
//!   neighbor lists. Nothing is re-linked.
//! - [`Projection::Collapsible`]: linear fragments can be folded into a single
//!   [`EdgeType::HiddenFragment`] edge and unfolded again.
//!
//! The per-node state itself lives in [`GraphFlags`]; a projection only contributes the
//! collapse bookkeeping, and [`ProjectedGraph`] combines both into a read-only view.

mod collapsed;
mod filtered;

pub use collapsed::HiddenEdges;
pub(crate) use collapsed::{CollapsePlan, plan_collapse};
pub use filtered::filtered_flags;

use crate::element::{EdgeType, NodeType};
use loggraph_core::{BaseGraph, Flags, GraphFlags, Layout, NOT_LOADED};

#[derive(Debug, Clone)]
pub enum Projection {
    Passthrough,
    Filtered,
    Collapsible(HiddenEdges),
}

impl Projection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Filtered => "filtered",
            Self::Collapsible(_) => "collapsible",
        }
    }

    pub fn is_collapsible(&self) -> bool {
        matches!(self, Self::Collapsible(_))
    }

    pub fn hidden_edges(&self) -> Option<&HiddenEdges> {
        match self {
            Self::Collapsible(hidden) => Some(hidden),
            _ => None,
        }
    }

    pub(crate) fn hidden_edges_mut(&mut self) -> Option<&mut HiddenEdges> {
        match self {
            Self::Collapsible(hidden) => Some(hidden),
            _ => None,
        }
    }

    /// Initial flags for this variant. `Filtered` graphs get theirs from [`filtered_flags`].
    pub(crate) fn initial_flags(&self, branch_visibility: Flags) -> GraphFlags {
        match self {
            Self::Passthrough => GraphFlags::all_visible(branch_visibility.len()),
            Self::Filtered | Self::Collapsible(_) => GraphFlags::new(branch_visibility),
        }
    }
}

/// Read-only view over base graph, layout, visibility and hidden edges.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedGraph<'a> {
    base: &'a BaseGraph,
    layout: &'a Layout,
    visible: &'a Flags,
    hidden: Option<&'a HiddenEdges>,
}

impl<'a> ProjectedGraph<'a> {
    pub fn new(
        base: &'a BaseGraph,
        layout: &'a Layout,
        visible: &'a Flags,
        hidden: Option<&'a HiddenEdges>,
    ) -> Self {
        Self {
            base,
            layout,
            visible,
            hidden,
        }
    }

    pub fn base(self) -> &'a BaseGraph {
        self.base
    }

    pub fn layout(self) -> &'a Layout {
        self.layout
    }

    pub fn hidden_edges(self) -> Option<&'a HiddenEdges> {
        self.hidden
    }

    pub fn is_visible(self, real: usize) -> bool {
        self.visible.get(real)
    }

    pub fn node_type(self, real: usize) -> NodeType {
        if self.layout.is_head(real) {
            NodeType::Head
        } else {
            NodeType::Usual
        }
    }

    /// `None` when no such edge exists in the projection.
    pub fn edge_type(self, up: usize, down: usize) -> Option<EdgeType> {
        if !self.is_visible(up) {
            return None;
        }
        if down == NOT_LOADED {
            return self
                .base
                .down_nodes(up)
                .contains(&NOT_LOADED)
                .then_some(EdgeType::NotLoaded);
        }
        if self.hidden.is_some_and(|h| h.contains(up, down)) {
            return Some(EdgeType::HiddenFragment);
        }
        (self.is_visible(down) && self.base.down_nodes(up).contains(&down))
            .then_some(EdgeType::Usual)
    }

    /// Visible up-neighbors in base adjacency order. The top of a hidden fragment takes the
    /// place of the fragment's last hidden node.
    pub fn up_nodes(self, real: usize) -> impl Iterator<Item = usize> + 'a {
        self.base
            .up_nodes(real)
            .iter()
            .filter_map(move |&n| self.map_up(real, n))
    }

    /// Visible down-neighbors in base adjacency order, [`NOT_LOADED`] included.
    pub fn down_nodes(self, real: usize) -> impl Iterator<Item = usize> + 'a {
        self.base
            .down_nodes(real)
            .iter()
            .filter_map(move |&n| self.map_down(real, n))
    }

    /// The only visible up-neighbor, if there is exactly one.
    pub fn single_up(self, real: usize) -> Option<usize> {
        single(self.up_nodes(real))
    }

    /// The only down-neighbor, if there is exactly one and it is loaded.
    pub fn single_down(self, real: usize) -> Option<usize> {
        single(self.down_nodes(real)).filter(|&n| n != NOT_LOADED)
    }

    fn map_up(self, real: usize, base_up: usize) -> Option<usize> {
        if self.visible.get(base_up) {
            return Some(base_up);
        }
        self.hidden?.up_target(real, base_up)
    }

    fn map_down(self, real: usize, base_down: usize) -> Option<usize> {
        if base_down == NOT_LOADED || self.visible.get(base_down) {
            return Some(base_down);
        }
        self.hidden?.down_target(real, base_down)
    }
}

fn single(mut it: impl Iterator<Item = usize>) -> Option<usize> {
    let first = it.next()?;
    it.next().is_none().then_some(first)
}
