//! View configuration.

use serde::{Deserialize, Serialize};

const MIN_FRAGMENT_HOPS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewOptions {
    /// Hops from the top of a fragment to its bottom. Anything below 2 is treated as 2, so a
    /// fragment always hides at least one commit.
    pub min_fragment_hops: usize,
    /// Caps how many commits a single generated fragment hides, including commits already
    /// folded into hidden edges it runs through.
    pub max_fragment_nodes: Option<usize>,
    /// Lane origins never disappear into a fragment.
    pub pin_branch_heads: bool,
    /// Recompute the highlight for the selected row after collapse/expand.
    pub rehighlight_after_collapse: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            min_fragment_hops: MIN_FRAGMENT_HOPS,
            max_fragment_nodes: None,
            pin_branch_heads: true,
            rehighlight_after_collapse: true,
        }
    }
}

impl ViewOptions {
    pub(crate) fn min_hops(&self) -> usize {
        self.min_fragment_hops.max(MIN_FRAGMENT_HOPS)
    }

    pub(crate) fn max_hidden(&self) -> usize {
        self.max_fragment_nodes.unwrap_or(usize::MAX).max(1)
    }
}
