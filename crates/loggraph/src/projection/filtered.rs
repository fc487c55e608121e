use loggraph_core::{Flags, GraphFlags};

/// Flags for a filtered projection: a node is visible iff it is visible in branch and passes
/// `predicate`. The predicate is not consulted for nodes outside the branch filter.
pub fn filtered_flags(branch_visibility: Flags, predicate: impl Fn(usize) -> bool) -> GraphFlags {
    let mut flags = GraphFlags::new(branch_visibility);
    for real in 0..flags.len() {
        if flags.is_visible(real) && !predicate(real) {
            flags.set_visible(real, false);
        }
    }
    flags
}
