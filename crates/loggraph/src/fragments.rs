//! Linear fragment detection.
//!
//! A hop `a -> b` is *linear* when `b` is the only down-neighbor of `a` and `a` is the only
//! up-neighbor of `b`, both in the current projection. A fragment is a run of linear hops
//! whose inner nodes are not pinned lane origins. It must span at least
//! [`ViewOptions::min_fragment_hops`] hops, so a single hop between a fork and a merge never
//! qualifies. Generated fragments hide at most [`ViewOptions::max_fragment_nodes`] commits,
//! counting those already folded into hidden edges along the run. All queries are pure functions of the projection state.

use crate::options::ViewOptions;
use crate::projection::ProjectedGraph;

/// A fragment in real indices: `up` and `down` stay visible, `hidden` (top to bottom) is what
/// a collapse hides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearChain {
    pub up: usize,
    pub down: usize,
    pub hidden: Vec<usize>,
}

impl LinearChain {
    pub fn hops(&self) -> usize {
        self.hidden.len() + 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FragmentGenerator<'a> {
    graph: ProjectedGraph<'a>,
    options: &'a ViewOptions,
}

impl<'a> FragmentGenerator<'a> {
    pub fn new(graph: ProjectedGraph<'a>, options: &'a ViewOptions) -> Self {
        Self { graph, options }
    }

    /// The longest fragment whose top is exactly `up`.
    pub fn long_down_fragment(&self, up: usize) -> Option<LinearChain> {
        if !self.graph.is_visible(up) {
            return None;
        }
        let max = self.options.max_hidden();
        let mut cur = self.next_down(up)?;
        let mut hidden = Vec::new();
        let mut nested = self.nested(up, cur);
        while nested + hidden.len() < max && !self.is_pinned(cur) {
            let Some(next) = self.next_down(cur) else {
                break;
            };
            let step = self.nested(cur, next);
            if nested + hidden.len() + 1 + step > max {
                break;
            }
            hidden.push(cur);
            nested += step;
            cur = next;
        }
        self.accept(LinearChain {
            up,
            down: cur,
            hidden,
        })
    }

    /// The longest fragment whose bottom is exactly `down`.
    pub fn long_up_fragment(&self, down: usize) -> Option<LinearChain> {
        if !self.graph.is_visible(down) {
            return None;
        }
        let max = self.options.max_hidden();
        let mut cur = self.next_up(down)?;
        let mut hidden = Vec::new();
        let mut nested = self.nested(cur, down);
        while nested + hidden.len() < max && !self.is_pinned(cur) {
            let Some(prev) = self.next_up(cur) else {
                break;
            };
            let step = self.nested(prev, cur);
            if nested + hidden.len() + 1 + step > max {
                break;
            }
            hidden.push(cur);
            nested += step;
            cur = prev;
        }
        hidden.reverse();
        self.accept(LinearChain {
            up: cur,
            down,
            hidden,
        })
    }

    /// The longest fragment hiding `real`, if `real` can be hidden at all.
    pub fn fragment_through(&self, real: usize) -> Option<LinearChain> {
        if !self.graph.is_visible(real) || self.is_pinned(real) {
            return None;
        }
        let mut top = self.next_up(real)?;
        let mut bottom = self.next_down(real)?;

        let max = self.options.max_hidden();
        let mut nested = self.nested(top, real) + self.nested(real, bottom);
        if nested + 1 > max {
            return None;
        }
        let mut above = Vec::new();
        let mut below = Vec::new();
        while nested + 1 + above.len() + below.len() < max && !self.is_pinned(bottom) {
            let Some(next) = self.next_down(bottom) else {
                break;
            };
            let step = self.nested(bottom, next);
            if nested + 2 + above.len() + below.len() + step > max {
                break;
            }
            below.push(bottom);
            nested += step;
            bottom = next;
        }
        while nested + 1 + above.len() + below.len() < max && !self.is_pinned(top) {
            let Some(prev) = self.next_up(top) else {
                break;
            };
            let step = self.nested(prev, top);
            if nested + 2 + above.len() + below.len() + step > max {
                break;
            }
            above.push(top);
            nested += step;
            top = prev;
        }

        let mut hidden = Vec::with_capacity(above.len() + 1 + below.len());
        hidden.extend(above.into_iter().rev());
        hidden.push(real);
        hidden.extend(below);
        self.accept(LinearChain {
            up: top,
            down: bottom,
            hidden,
        })
    }

    /// Fragment for a clicked node: the run hiding it, else the run starting at it, else the run
    /// ending at it.
    pub fn long_node_fragment(&self, real: usize) -> Option<LinearChain> {
        self.fragment_through(real)
            .or_else(|| self.long_down_fragment(real))
            .or_else(|| self.long_up_fragment(real))
    }

    /// Fragment containing the hop `up -> down`; `None` unless the hop is linear.
    pub fn long_edge_fragment(&self, up: usize, down: usize) -> Option<LinearChain> {
        if self.next_down(up) != Some(down) {
            return None;
        }
        self.fragment_through(down)
            .or_else(|| self.fragment_through(up))
    }

    /// Validates an explicit `(up, down)` pair. The run between them must consist of linear
    /// hops only; it does not have to be maximal.
    pub fn chain_between(&self, up: usize, down: usize) -> Option<LinearChain> {
        if up >= down || !self.graph.is_visible(up) || !self.graph.is_visible(down) {
            return None;
        }
        let mut cur = self.next_down(up)?;
        let mut hidden = Vec::new();
        while cur != down {
            if cur > down || self.is_pinned(cur) {
                return None;
            }
            hidden.push(cur);
            cur = self.next_down(cur)?;
        }
        self.accept(LinearChain { up, down, hidden })
    }

    fn accept(&self, chain: LinearChain) -> Option<LinearChain> {
        (chain.hops() >= self.options.min_hops()).then_some(chain)
    }

    /// Nodes already hidden behind the hop `up -> down`.
    fn nested(&self, up: usize, down: usize) -> usize {
        self.graph
            .hidden_edges()
            .map_or(0, |hidden| hidden.hidden_count(up, down))
    }

    fn is_pinned(&self, real: usize) -> bool {
        self.options.pin_branch_heads && self.graph.layout().is_head(real)
    }

    fn next_down(&self, real: usize) -> Option<usize> {
        let next = self.graph.single_down(real)?;
        (self.graph.single_up(next) == Some(real)).then_some(next)
    }

    fn next_up(&self, real: usize) -> Option<usize> {
        let prev = self.graph.single_up(real)?;
        (self.graph.single_down(prev) == Some(real)).then_some(prev)
    }
}
