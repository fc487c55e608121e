#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("visible row {row} is out of range (visible rows: {len})")]
    RowOutOfRange { row: usize, len: usize },

    #[error("node index {index} is out of range (nodes: {len})")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("edge {up} -> {down} has an endpoint outside the graph (nodes: {len})")]
    EdgeEndpointOutOfRange { up: usize, down: usize, len: usize },

    #[error("edge {up} -> {down} does not point downward; the graph must be topologically laid out")]
    EdgeNotTopological { up: usize, down: usize },

    #[error("commit hash {hash} appears more than once")]
    DuplicateHash { hash: String },

    #[error("{what} covers {actual} nodes but the graph has {expected}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("nodes {up} and {down} do not bound a collapsible fragment")]
    NotAFragment { up: usize, down: usize },

    #[error("there is no hidden fragment between nodes {up} and {down}")]
    NotCollapsed { up: usize, down: usize },

    #[error("{operation} is not supported by the {projection} projection")]
    Unsupported {
        operation: &'static str,
        projection: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
