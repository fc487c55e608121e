use crate::element::GraphElement;

/// User interaction routed to [`crate::MutableGraph::perform_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphAction {
    /// Click on a node or edge: expands a hidden fragment or collapses the fragment under it.
    Click(GraphElement),
    /// Selects a row for highlighting; `None` clears the selection.
    RowClick(Option<usize>),
    Hover(Option<GraphElement>),
    /// `true` expands every fragment, `false` collapses every linear branch.
    LinearBranchesExpansion(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// The structure changed; the row to keep in view.
    Row(usize),
    /// State changed without a specific row of interest.
    Repaint,
    NoOp,
}

impl ActionResult {
    pub fn row(self) -> Option<usize> {
        match self {
            Self::Row(row) => Some(row),
            Self::Repaint | Self::NoOp => None,
        }
    }

    pub fn is_noop(self) -> bool {
        self == Self::NoOp
    }
}
