//! Row-addressed values handed to the rendering layer.
//!
//! Nothing here is cached: every [`Node`] is rebuilt from the current projection state when it
//! is requested, so a value obtained before a collapse may refer to rows that moved since.

use loggraph_core::NOT_LOADED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Usual,
    /// A lane origin: a branch head or a commit without children.
    Head,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeType {
    #[default]
    Usual,
    /// Synthetic edge standing in for a collapsed linear fragment.
    HiddenFragment,
    /// Edge to a parent outside the loaded history; drawn dotted.
    NotLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub up_row: usize,
    /// [`NOT_LOADED`] for [`EdgeType::NotLoaded`] edges.
    pub down_row: usize,
    pub kind: EdgeType,
    pub layout_index: u32,
}

impl Edge {
    pub fn is_not_loaded(&self) -> bool {
        self.down_row == NOT_LOADED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub row: usize,
    pub kind: NodeType,
    pub up_edges: Vec<Edge>,
    pub down_edges: Vec<Edge>,
    pub layout_index: u32,
}

impl Node {
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.down_edges.iter().chain(self.up_edges.iter())
    }
}

/// Something the user can point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
}

impl From<Node> for GraphElement {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Edge> for GraphElement {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

/// A collapsible linear run, addressed by the visible rows of its two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub up_row: usize,
    pub down_row: usize,
}

impl Fragment {
    pub fn new(up_row: usize, down_row: usize) -> Self {
        Self { up_row, down_row }
    }
}
