//! Branch-visibility propagation.

use crate::NOT_LOADED;
use crate::dfs::Dfs;
use crate::flags::Flags;
use crate::graph::BaseGraph;

/// Marks every node reachable downward from `heads` (heads included).
///
/// This is the "show only these branches" eligibility: a commit is visible in branch if it is
/// an ancestor of at least one selected branch head.
pub fn branch_visibility(graph: &BaseGraph, heads: &[usize]) -> Flags {
    let mut flags = Flags::new(graph.node_count(), false);
    let mut dfs = Dfs::new();
    for &head in heads {
        if !graph.contains(head) || flags.set(head, true) {
            continue;
        }
        dfs.walk(head, |node| {
            let next = graph
                .down_nodes(node)
                .iter()
                .copied()
                .find(|&d| d != NOT_LOADED && !flags.get(d))?;
            flags.set(next, true);
            Some(next)
        });
    }
    flags
}
