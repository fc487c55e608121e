//! Lane ("layout index") assignment.
//!
//! Every head starts a walk that hands its current lane to each node it reaches first, always
//! descending into the first down-neighbor that has no lane yet. Backtracking out of a node
//! that was laned on this visit opens a new lane, so a branch that forks off an already laned
//! path gets its own index. Lanes start at 1.

use crate::NOT_LOADED;
use crate::dfs::Dfs;
use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::graph::BaseGraph;

#[derive(Debug, Clone, Default)]
pub struct Layout {
    indices: Vec<u32>,
    heads: Vec<usize>,
    is_head: Flags,
    head_of: Vec<usize>,
}

impl Layout {
    /// `branch_heads` are processed first, in the given order, followed by every node without
    /// up-neighbors in index order. Out-of-range entries are ignored.
    pub fn build(graph: &BaseGraph, branch_heads: &[usize]) -> Self {
        let n = graph.node_count();
        let heads = collect_heads(graph, branch_heads);

        let mut indices = vec![0u32; n];
        let mut head_of = vec![NOT_LOADED; n];
        let mut current: u32 = 1;
        let mut dfs = Dfs::new();
        for &head in &heads {
            dfs.walk(head, |node| {
                let first_visit = indices[node] == 0;
                if first_visit {
                    indices[node] = current;
                    head_of[node] = head;
                }
                let next = graph
                    .down_nodes(node)
                    .iter()
                    .copied()
                    .find(|&d| d != NOT_LOADED && indices[d] == 0);
                if next.is_none() && first_visit {
                    current += 1;
                }
                next
            });
        }

        Self::assemble(indices, heads, head_of)
    }

    /// Wraps lanes computed elsewhere. `heads` only marks lane origins; ownership of each node
    /// (`head_of`) goes to the first head, in the given order, that reaches it.
    pub fn from_indices(graph: &BaseGraph, indices: Vec<u32>, heads: Vec<usize>) -> Result<Self> {
        let n = graph.node_count();
        if indices.len() != n {
            return Err(Error::SizeMismatch {
                what: "layout",
                expected: n,
                actual: indices.len(),
            });
        }
        if let Some(&bad) = heads.iter().find(|&&h| h >= n) {
            return Err(Error::NodeOutOfRange { index: bad, len: n });
        }

        let mut head_of = vec![NOT_LOADED; n];
        let mut dfs = Dfs::new();
        for &head in &heads {
            if head_of[head] != NOT_LOADED {
                continue;
            }
            head_of[head] = head;
            dfs.walk(head, |node| {
                let next = graph
                    .down_nodes(node)
                    .iter()
                    .copied()
                    .find(|&d| d != NOT_LOADED && head_of[d] == NOT_LOADED)?;
                head_of[next] = head;
                Some(next)
            });
        }

        Ok(Self::assemble(indices, heads, head_of))
    }

    fn assemble(indices: Vec<u32>, heads: Vec<usize>, head_of: Vec<usize>) -> Self {
        let mut is_head = Flags::new(indices.len(), false);
        for &h in &heads {
            is_head.set(h, true);
        }
        Self {
            indices,
            heads,
            is_head,
            head_of,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `0` for indices the layout does not cover (including `NOT_LOADED`).
    pub fn layout_index(&self, index: usize) -> u32 {
        self.indices.get(index).copied().unwrap_or(0)
    }

    pub fn heads(&self) -> &[usize] {
        &self.heads
    }

    pub fn is_head(&self, index: usize) -> bool {
        self.is_head.get(index)
    }

    pub fn head_of(&self, index: usize) -> Option<usize> {
        self.head_of.get(index).copied().filter(|&h| h != NOT_LOADED)
    }
}

fn collect_heads(graph: &BaseGraph, branch_heads: &[usize]) -> Vec<usize> {
    let n = graph.node_count();
    let mut seen = Flags::new(n, false);
    let mut heads = Vec::new();
    for &h in branch_heads {
        if h < n && !seen.set(h, true) {
            heads.push(h);
        }
    }
    for i in 0..n {
        if graph.up_nodes(i).is_empty() && !seen.set(i, true) {
            heads.push(i);
        }
    }
    heads
}
