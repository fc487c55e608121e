//! Selection highlighting ("thick" nodes and edges).

use crate::element::GraphElement;
use crate::projection::ProjectedGraph;
use loggraph_core::{Dfs, Flags, NOT_LOADED};
use tracing::debug;

/// Tracks the selected commit and the hovered element.
///
/// Selecting a node marks it and everything reachable from it in either direction (all its
/// ancestors and descendants in the current projection) as thick.
#[derive(Debug, Default)]
pub struct ThickController {
    selected: Option<usize>,
    hovered: Option<GraphElement>,
    dfs: Dfs,
}

impl ThickController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected real index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<&GraphElement> {
        self.hovered.as_ref()
    }

    /// Clears the highlight and, for a visible `real`, highlights its ancestors and
    /// descendants. Returns the number of thick nodes.
    pub fn on_row_click(
        &mut self,
        graph: ProjectedGraph<'_>,
        thick: &mut Flags,
        real: Option<usize>,
    ) -> usize {
        self.selected = real.filter(|&r| graph.is_visible(r));
        self.highlight(graph, thick)
    }

    /// Re-runs the highlight for the current selection after the projection changed. A
    /// selection that is no longer visible is dropped.
    pub fn refresh(&mut self, graph: ProjectedGraph<'_>, thick: &mut Flags) -> usize {
        self.selected = self.selected.filter(|&r| graph.is_visible(r));
        self.highlight(graph, thick)
    }

    pub fn on_hover(&mut self, element: Option<GraphElement>) {
        self.hovered = element;
    }

    /// Hover highlighting is not defined for any projection yet; the hovered element is only
    /// recorded.
    pub fn is_hover(&self, _element: &GraphElement) -> bool {
        false
    }

    fn highlight(&mut self, graph: ProjectedGraph<'_>, thick: &mut Flags) -> usize {
        thick.set_all(false);
        let Some(start) = self.selected else {
            return 0;
        };
        thick.set(start, true);
        let mut count = 1;

        self.dfs.walk(start, |node| {
            let next = graph
                .down_nodes(node)
                .find(|&n| n != NOT_LOADED && !thick.get(n))?;
            thick.set(next, true);
            count += 1;
            Some(next)
        });
        self.dfs.walk(start, |node| {
            let next = graph.up_nodes(node).find(|&n| !thick.get(n))?;
            thick.set(next, true);
            count += 1;
            Some(next)
        });

        debug!(selected = start, thick = count, "recomputed highlight");
        count
    }
}

pub fn is_node_thick(thick: &Flags, real: usize) -> bool {
    thick.get(real)
}

/// An edge is thick when both ends are; an edge into unloaded history only needs its top.
pub fn is_edge_thick(thick: &Flags, up: usize, down: usize) -> bool {
    thick.get(up) && (down == NOT_LOADED || thick.get(down))
}
