//! Row-addressed access to a projected commit graph, plus interaction handling.
//!
//! A [`MutableGraph`] owns the flags, the index map and the projection state for one view of a
//! shared, immutable base graph. All operations run synchronously on the caller's thread;
//! callers serialize access (typically by confining the graph to the UI thread).

use crate::action::{ActionResult, GraphAction};
use crate::element::{Edge, EdgeType, Fragment, GraphElement, Node};
use crate::fragments::{FragmentGenerator, LinearChain};
use crate::options::ViewOptions;
use crate::projection::{
    CollapsePlan, HiddenEdges, ProjectedGraph, Projection, filtered_flags, plan_collapse,
};
use crate::thick::{ThickController, is_edge_thick, is_node_thick};
use loggraph_core::{
    BaseGraph, Error, Flags, GraphFlags, Layout, NOT_LOADED, Result, VisibleIndexMap,
};
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub struct MutableGraph {
    base: Arc<BaseGraph>,
    layout: Arc<Layout>,
    options: ViewOptions,
    projection: Projection,
    flags: GraphFlags,
    index_map: VisibleIndexMap,
    thick: ThickController,
}

impl MutableGraph {
    /// Every node visible, base adjacency unchanged.
    pub fn passthrough(
        base: Arc<BaseGraph>,
        layout: Arc<Layout>,
        options: ViewOptions,
    ) -> Result<Self> {
        let branch_visibility = Flags::new(base.node_count(), true);
        let flags = Projection::Passthrough.initial_flags(branch_visibility);
        Self::assemble(base, layout, Projection::Passthrough, flags, options)
    }

    /// Nodes visible in branch that also pass `predicate`.
    pub fn filtered(
        base: Arc<BaseGraph>,
        layout: Arc<Layout>,
        branch_visibility: Flags,
        predicate: impl Fn(usize) -> bool,
        options: ViewOptions,
    ) -> Result<Self> {
        check_size("branch visibility", base.node_count(), branch_visibility.len())?;
        let flags = filtered_flags(branch_visibility, predicate);
        Self::assemble(base, layout, Projection::Filtered, flags, options)
    }

    /// Nodes visible in branch, with linear fragments foldable.
    pub fn collapsible(
        base: Arc<BaseGraph>,
        layout: Arc<Layout>,
        branch_visibility: Flags,
        options: ViewOptions,
    ) -> Result<Self> {
        check_size("branch visibility", base.node_count(), branch_visibility.len())?;
        let projection = Projection::Collapsible(HiddenEdges::new());
        let flags = projection.initial_flags(branch_visibility);
        Self::assemble(base, layout, projection, flags, options)
    }

    fn assemble(
        base: Arc<BaseGraph>,
        layout: Arc<Layout>,
        projection: Projection,
        flags: GraphFlags,
        options: ViewOptions,
    ) -> Result<Self> {
        check_size("layout", base.node_count(), layout.len())?;
        let index_map = VisibleIndexMap::build(base.node_count(), |i| flags.is_visible(i));
        Ok(Self {
            base,
            layout,
            options,
            projection,
            flags,
            index_map,
            thick: ThickController::new(),
        })
    }

    pub fn base(&self) -> &BaseGraph {
        &self.base
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn flags(&self) -> &GraphFlags {
        &self.flags
    }

    pub fn graph(&self) -> ProjectedGraph<'_> {
        ProjectedGraph::new(
            &self.base,
            &self.layout,
            self.flags.visible(),
            self.projection.hidden_edges(),
        )
    }

    fn fragments(&self) -> FragmentGenerator<'_> {
        FragmentGenerator::new(self.graph(), &self.options)
    }

    /// Number of visible rows.
    pub fn node_count(&self) -> usize {
        self.index_map.visible_len()
    }

    pub fn real_index(&self, row: usize) -> Result<usize> {
        self.index_map.to_real(row)
    }

    /// Visible row of a real index; `None` if it is hidden.
    pub fn row_of(&self, real: usize) -> Option<usize> {
        self.index_map.to_visible(real).filter(|&row| row != NOT_LOADED)
    }

    pub fn hash(&self, row: usize) -> Result<Cow<'_, str>> {
        let real = self.real_index(row)?;
        self.base.hash(real).ok_or(Error::NodeOutOfRange {
            index: real,
            len: self.base.node_count(),
        })
    }

    pub fn node(&self, row: usize) -> Result<Node> {
        let real = self.real_index(row)?;
        let graph = self.graph();
        let up_edges = graph
            .up_nodes(real)
            .filter_map(|up| self.edge(graph, up, real))
            .collect();
        let down_edges = graph
            .down_nodes(real)
            .filter_map(|down| self.edge(graph, real, down))
            .collect();
        Ok(Node {
            row,
            kind: graph.node_type(real),
            up_edges,
            down_edges,
            layout_index: self.layout.layout_index(real),
        })
    }

    fn edge(&self, graph: ProjectedGraph<'_>, up: usize, down: usize) -> Option<Edge> {
        let kind = graph.edge_type(up, down)?;
        let up_row = self.index_map.to_visible(up)?;
        let down_row = self.index_map.to_visible(down)?;
        let layout_index = if down == NOT_LOADED {
            self.layout.layout_index(up)
        } else {
            self.layout
                .layout_index(up)
                .max(self.layout.layout_index(down))
        };
        Some(Edge {
            up_row,
            down_row,
            kind,
            layout_index,
        })
    }

    fn resolve_edge(&self, edge: &Edge) -> Option<(usize, usize)> {
        let up = self.real_index(edge.up_row).ok()?;
        let down = if edge.is_not_loaded() {
            NOT_LOADED
        } else {
            self.real_index(edge.down_row).ok()?
        };
        Some((up, down))
    }

    /// Top-level collapsed fragments as `(up, down)` real indices.
    pub fn hidden_fragments(&self) -> Vec<(usize, usize)> {
        self.projection
            .hidden_edges()
            .map(HiddenEdges::pairs)
            .unwrap_or_default()
    }

    /// Selected row, if the selection is visible.
    pub fn selected_row(&self) -> Option<usize> {
        self.thick.selected().and_then(|real| self.row_of(real))
    }

    pub fn is_thick(&self, element: &GraphElement) -> bool {
        match element {
            GraphElement::Node(node) => self
                .real_index(node.row)
                .is_ok_and(|real| is_node_thick(self.flags.thick(), real)),
            GraphElement::Edge(edge) => self
                .resolve_edge(edge)
                .is_some_and(|(up, down)| is_edge_thick(self.flags.thick(), up, down)),
        }
    }

    pub fn is_hover(&self, element: &GraphElement) -> bool {
        self.thick.is_hover(element)
    }

    pub fn long_fragment(&self, element: &GraphElement) -> Option<Fragment> {
        let chain = self.long_chain(element)?;
        self.to_fragment(&chain)
    }

    pub fn long_down_fragment(&self, row: usize) -> Result<Option<Fragment>> {
        let real = self.real_index(row)?;
        Ok(self
            .fragments()
            .long_down_fragment(real)
            .and_then(|chain| self.to_fragment(&chain)))
    }

    fn long_chain(&self, element: &GraphElement) -> Option<LinearChain> {
        match element {
            GraphElement::Node(node) => {
                let real = self.real_index(node.row).ok()?;
                self.fragments().long_node_fragment(real)
            }
            GraphElement::Edge(edge) => {
                if edge.kind != EdgeType::Usual {
                    return None;
                }
                let (up, down) = self.resolve_edge(edge)?;
                self.fragments().long_edge_fragment(up, down)
            }
        }
    }

    fn to_fragment(&self, chain: &LinearChain) -> Option<Fragment> {
        Some(Fragment::new(
            self.row_of(chain.up)?,
            self.row_of(chain.down)?,
        ))
    }

    /// Folds the fragment between two visible rows into one hidden edge.
    ///
    /// The rows must bound a run of linear hops; anything else is rejected without touching
    /// the current state.
    pub fn collapse(&mut self, fragment: Fragment) -> Result<()> {
        let up = self.real_index(fragment.up_row)?;
        let down = self.real_index(fragment.down_row)?;
        self.collapse_real(up, down)
    }

    pub fn collapse_real(&mut self, up: usize, down: usize) -> Result<()> {
        self.require_collapsible("collapse")?;
        let plan = self
            .fragments()
            .chain_between(up, down)
            .and_then(|chain| plan_collapse(self.graph(), &chain));
        let Some(plan) = plan else {
            warn!(up, down, "rejected collapse of a non-fragment");
            return Err(Error::NotAFragment { up, down });
        };
        if let Some(window) = self.apply_collapse(plan) {
            self.refresh_window(window);
            debug!(up, down, "collapsed fragment");
        }
        Ok(())
    }

    /// Unfolds the hidden edge between two visible rows.
    pub fn expand(&mut self, fragment: Fragment) -> Result<()> {
        let up = self.real_index(fragment.up_row)?;
        let down = self.real_index(fragment.down_row)?;
        self.expand_real(up, down)
    }

    pub fn expand_real(&mut self, up: usize, down: usize) -> Result<()> {
        self.require_collapsible("expand")?;
        let Some(hidden) = self.projection.hidden_edges_mut() else {
            return Ok(());
        };
        match hidden.expand(&mut self.flags, up, down) {
            Ok(window) => {
                self.refresh_window(window);
                debug!(up, down, "expanded fragment");
                Ok(())
            }
            Err(err) => {
                warn!(up, down, "rejected expand of a pair without a hidden edge");
                Err(err)
            }
        }
    }

    pub fn expand_all(&mut self) -> Result<()> {
        self.require_collapsible("expand all")?;
        let Some(hidden) = self.projection.hidden_edges_mut() else {
            return Ok(());
        };
        let fragments = hidden.len();
        hidden.clear();
        self.flags.reset_visible();
        self.refresh_window(0..self.base.node_count());
        debug!(fragments, "expanded all fragments");
        Ok(())
    }

    /// Walks the graph top to bottom and folds the longest down fragment of every still
    /// visible node. Returns how many fragments were folded.
    pub fn collapse_linear_branches(&mut self) -> Result<usize> {
        self.require_collapsible("collapse linear branches")?;
        let mut folded = 0;
        for real in 0..self.base.node_count() {
            if !self.flags.is_visible(real) {
                continue;
            }
            let plan = self
                .fragments()
                .long_down_fragment(real)
                .and_then(|chain| plan_collapse(self.graph(), &chain));
            if let Some(plan) = plan {
                trace!(up = plan.up(), down = plan.down(), "folding linear branch");
                if self.apply_collapse(plan).is_some() {
                    folded += 1;
                }
            }
        }
        if folded > 0 {
            self.refresh_window(0..self.base.node_count());
        }
        debug!(folded, "collapsed linear branches");
        Ok(folded)
    }

    fn require_collapsible(&self, operation: &'static str) -> Result<()> {
        if self.projection.is_collapsible() {
            Ok(())
        } else {
            Err(Error::Unsupported {
                operation,
                projection: self.projection.name(),
            })
        }
    }

    fn apply_collapse(&mut self, plan: CollapsePlan) -> Option<Range<usize>> {
        let hidden = self.projection.hidden_edges_mut()?;
        Some(hidden.collapse(&mut self.flags, plan))
    }

    /// Re-syncs the index map for `window` and the highlight with the new visibility.
    fn refresh_window(&mut self, window: Range<usize>) {
        let flags = &self.flags;
        self.index_map.update(window, |i| flags.is_visible(i));
        if self.options.rehighlight_after_collapse && self.thick.selected().is_some() {
            self.refresh_highlight();
        }
    }

    fn select(&mut self, real: Option<usize>) -> usize {
        let (visible, thick) = self.flags.visible_and_thick_mut();
        let graph = ProjectedGraph::new(
            &self.base,
            &self.layout,
            visible,
            self.projection.hidden_edges(),
        );
        self.thick.on_row_click(graph, thick, real)
    }

    fn refresh_highlight(&mut self) -> usize {
        let (visible, thick) = self.flags.visible_and_thick_mut();
        let graph = ProjectedGraph::new(
            &self.base,
            &self.layout,
            visible,
            self.projection.hidden_edges(),
        );
        self.thick.refresh(graph, thick)
    }

    pub fn perform_action(&mut self, action: GraphAction) -> ActionResult {
        match action {
            GraphAction::Click(element) => self.click(&element),
            GraphAction::RowClick(row) => self.row_click(row),
            GraphAction::Hover(element) => {
                self.thick.on_hover(element);
                ActionResult::NoOp
            }
            GraphAction::LinearBranchesExpansion(expand) => {
                let outcome = if expand {
                    self.expand_all()
                } else {
                    self.collapse_linear_branches().map(|_| ())
                };
                match outcome {
                    Ok(()) => ActionResult::Repaint,
                    Err(err) => {
                        trace!(%err, "linear branches toggle ignored");
                        ActionResult::NoOp
                    }
                }
            }
        }
    }

    fn row_click(&mut self, row: Option<usize>) -> ActionResult {
        let real = match row.map(|row| self.real_index(row)).transpose() {
            Ok(real) => real,
            Err(err) => {
                trace!(%err, "row click on a stale row");
                return ActionResult::NoOp;
            }
        };
        let thick = self.select(real);
        trace!(?row, thick, "row click");
        ActionResult::Repaint
    }

    fn click(&mut self, element: &GraphElement) -> ActionResult {
        if !self.projection.is_collapsible() {
            trace!(projection = self.projection.name(), "click ignored");
            return ActionResult::NoOp;
        }

        if let Some((up, down)) = self.hidden_edge_at(element) {
            return match self.expand_real(up, down) {
                Ok(()) => self.row_of(up).map_or(ActionResult::NoOp, ActionResult::Row),
                Err(_) => ActionResult::NoOp,
            };
        }

        let Some(chain) = self.long_chain(element) else {
            trace!("click hit nothing collapsible");
            return ActionResult::NoOp;
        };
        let up = chain.up;
        let Some(plan) = plan_collapse(self.graph(), &chain) else {
            return ActionResult::NoOp;
        };
        let Some(window) = self.apply_collapse(plan) else {
            return ActionResult::NoOp;
        };
        self.refresh_window(window);
        debug!(up, down = chain.down, "collapsed fragment on click");
        self.row_of(up).map_or(ActionResult::NoOp, ActionResult::Row)
    }

    /// The hidden edge a click should expand: the edge itself, or the first hidden edge
    /// touching a clicked node (down edges first).
    fn hidden_edge_at(&self, element: &GraphElement) -> Option<(usize, usize)> {
        let hidden = self.projection.hidden_edges()?;
        match element {
            GraphElement::Edge(edge) => {
                if edge.kind != EdgeType::HiddenFragment {
                    return None;
                }
                let (up, down) = self.resolve_edge(edge)?;
                hidden.contains(up, down).then_some((up, down))
            }
            GraphElement::Node(node) => {
                let real = self.real_index(node.row).ok()?;
                let graph = self.graph();
                graph
                    .down_nodes(real)
                    .find(|&down| hidden.contains(real, down))
                    .map(|down| (real, down))
                    .or_else(|| {
                        graph
                            .up_nodes(real)
                            .find(|&up| hidden.contains(up, real))
                            .map(|up| (up, real))
                    })
            }
        }
    }
}

fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::SizeMismatch {
            what,
            expected,
            actual,
        })
    }
}
