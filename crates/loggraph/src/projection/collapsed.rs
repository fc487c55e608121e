//! Collapse bookkeeping for the collapsible projection.
//!
//! A collapsed fragment `up -> ... -> down` is stored as one hidden edge. The edge is found
//! from either end through the base neighbor it replaces (`up_key` in `up`'s down list,
//! `down_key` in `down`'s up list), which keeps neighbor order stable. Hidden edges lying on a
//! fragment that gets collapsed are absorbed into the new edge and come back on expand.

use super::ProjectedGraph;
use crate::fragments::LinearChain;
use loggraph_core::{Error, GraphFlags, Result};
use rustc_hash::FxBuildHasher;
use std::ops::Range;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HiddenEdge {
    up: usize,
    down: usize,
    up_key: usize,
    down_key: usize,
    /// Nodes this collapse turned invisible.
    hidden: Vec<usize>,
    absorbed: Vec<HiddenEdge>,
}

impl HiddenEdge {
    fn hidden_count(&self) -> usize {
        self.hidden.len()
            + self
                .absorbed
                .iter()
                .map(HiddenEdge::hidden_count)
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollapsePlan {
    up: usize,
    down: usize,
    up_key: usize,
    down_key: usize,
    hidden: Vec<usize>,
    absorbed: Vec<(usize, usize)>,
}

impl CollapsePlan {
    pub(crate) fn up(&self) -> usize {
        self.up
    }

    pub(crate) fn down(&self) -> usize {
        self.down
    }
}

/// Resolves everything a collapse needs against the current state, without mutating it.
pub(crate) fn plan_collapse(
    graph: ProjectedGraph<'_>,
    chain: &LinearChain,
) -> Option<CollapsePlan> {
    let first = *chain.hidden.first()?;
    let last = *chain.hidden.last()?;

    let up_key = graph
        .base()
        .down_nodes(chain.up)
        .iter()
        .copied()
        .find(|&n| graph.map_down(chain.up, n) == Some(first))?;
    let down_key = graph
        .base()
        .up_nodes(chain.down)
        .iter()
        .copied()
        .find(|&n| graph.map_up(chain.down, n) == Some(last))?;

    let absorbed = match graph.hidden_edges() {
        Some(hidden) => std::iter::once(chain.up)
            .chain(chain.hidden.iter().copied())
            .zip(chain.hidden.iter().copied().chain(std::iter::once(chain.down)))
            .filter(|&(a, b)| hidden.contains(a, b))
            .collect(),
        None => Vec::new(),
    };

    Some(CollapsePlan {
        up: chain.up,
        down: chain.down,
        up_key,
        down_key,
        hidden: chain.hidden.clone(),
        absorbed,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenEdges {
    edges: HashMap<(usize, usize), HiddenEdge>,
    down_targets: HashMap<(usize, usize), usize>,
    up_targets: HashMap<(usize, usize), usize>,
}

impl HiddenEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, up: usize, down: usize) -> bool {
        self.edges.contains_key(&(up, down))
    }

    /// Top-level hidden edges as `(up, down)` real indices, sorted.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self.edges.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Nodes hidden behind the edge `up -> down`, nested collapses included; `0` if the pair
    /// is not a hidden edge.
    pub fn hidden_count(&self, up: usize, down: usize) -> usize {
        self.edges
            .get(&(up, down))
            .map_or(0, HiddenEdge::hidden_count)
    }

    /// Total number of nodes hidden by collapses, nested ones included.
    pub fn hidden_node_count(&self) -> usize {
        self.edges.values().map(HiddenEdge::hidden_count).sum()
    }

    pub(crate) fn down_target(&self, up: usize, base_down: usize) -> Option<usize> {
        self.down_targets.get(&(up, base_down)).copied()
    }

    pub(crate) fn up_target(&self, down: usize, base_up: usize) -> Option<usize> {
        self.up_targets.get(&(down, base_up)).copied()
    }

    /// Applies a plan produced by [`plan_collapse`] against the current state. Returns the
    /// real-index window whose visibility changed.
    pub(crate) fn collapse(&mut self, flags: &mut GraphFlags, plan: CollapsePlan) -> Range<usize> {
        let absorbed: Vec<HiddenEdge> = plan
            .absorbed
            .iter()
            .filter_map(|&(a, b)| self.remove(a, b))
            .collect();
        for &real in &plan.hidden {
            flags.set_visible(real, false);
        }
        let window = plan.up + 1..plan.down;
        self.insert(HiddenEdge {
            up: plan.up,
            down: plan.down,
            up_key: plan.up_key,
            down_key: plan.down_key,
            hidden: plan.hidden,
            absorbed,
        });
        window
    }

    pub(crate) fn expand(
        &mut self,
        flags: &mut GraphFlags,
        up: usize,
        down: usize,
    ) -> Result<Range<usize>> {
        let edge = self
            .remove(up, down)
            .ok_or(Error::NotCollapsed { up, down })?;
        for &real in &edge.hidden {
            flags.set_visible(real, true);
        }
        for inner in edge.absorbed {
            self.insert(inner);
        }
        Ok(up + 1..down)
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
        self.down_targets.clear();
        self.up_targets.clear();
    }

    fn insert(&mut self, edge: HiddenEdge) {
        self.down_targets.insert((edge.up, edge.up_key), edge.down);
        self.up_targets.insert((edge.down, edge.down_key), edge.up);
        self.edges.insert((edge.up, edge.down), edge);
    }

    fn remove(&mut self, up: usize, down: usize) -> Option<HiddenEdge> {
        let edge = self.edges.remove(&(up, down))?;
        self.down_targets.remove(&(edge.up, edge.up_key));
        self.up_targets.remove(&(edge.down, edge.down_key));
        Some(edge)
    }
}
