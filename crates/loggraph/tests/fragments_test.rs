use loggraph::base::{BaseGraph, Flags, Layout, branch_visibility};
use loggraph::{
    Fragment, FragmentGenerator, GraphElement, LinearChain, MutableGraph, ViewOptions,
};
use std::sync::Arc;

fn collapsible_with(base: BaseGraph, branch_heads: &[usize], options: ViewOptions) -> MutableGraph {
    let layout = Layout::build(&base, branch_heads);
    let all = Flags::new(base.node_count(), true);
    MutableGraph::collapsible(Arc::new(base), Arc::new(layout), all, options).unwrap()
}

fn collapsible(base: BaseGraph) -> MutableGraph {
    collapsible_with(base, &[], ViewOptions::default())
}

fn node(graph: &MutableGraph, row: usize) -> GraphElement {
    GraphElement::Node(graph.node(row).unwrap())
}

#[test]
fn linear_history_is_one_fragment() {
    let graph = collapsible(BaseGraph::linear(6));
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 5)));
    assert_eq!(graph.long_down_fragment(4).unwrap(), None);
    assert_eq!(graph.long_down_fragment(5).unwrap(), None);
    assert!(graph.long_down_fragment(6).is_err());
}

#[test]
fn fork_and_merge_break_fragments() {
    // 0 -> 1 -> 3, 0 -> 2 -> 3
    let base = BaseGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    let graph = collapsible(base);
    for row in 0..4 {
        assert_eq!(graph.long_down_fragment(row).unwrap(), None, "row {row}");
    }
    for row in 0..4 {
        assert_eq!(graph.long_fragment(&node(&graph, row)), None, "row {row}");
    }
}

#[test]
fn merge_commit_stays_visible() {
    // 0 -> 1 -> 2 -> 4 <- 3, 4 -> 5
    let base = BaseGraph::from_edges(6, [(0, 1), (1, 2), (2, 4), (3, 4), (4, 5)]).unwrap();
    let graph = collapsible(base);
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 2)));
    assert_eq!(graph.long_down_fragment(3).unwrap(), None);
    assert_eq!(graph.long_down_fragment(4).unwrap(), None);
}

#[test]
fn pinned_branch_heads_split_fragments() {
    let graph = collapsible_with(BaseGraph::linear(6), &[3], ViewOptions::default());
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 3)));
    assert_eq!(graph.long_down_fragment(3).unwrap(), Some(Fragment::new(3, 5)));

    let options = ViewOptions {
        pin_branch_heads: false,
        ..ViewOptions::default()
    };
    let graph = collapsible_with(BaseGraph::linear(6), &[3], options);
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 5)));
}

#[test]
fn node_fragments_prefer_the_run_hiding_the_node() {
    let graph = collapsible(BaseGraph::linear(6));
    // Middle node: hidden by the whole run.
    assert_eq!(graph.long_fragment(&node(&graph, 2)), Some(Fragment::new(0, 5)));
    // Pinned head: the run starting at it.
    assert_eq!(graph.long_fragment(&node(&graph, 0)), Some(Fragment::new(0, 5)));
    // Last node: the run ending at it.
    assert_eq!(graph.long_fragment(&node(&graph, 5)), Some(Fragment::new(0, 5)));
}

#[test]
fn edge_fragments_require_a_linear_hop() {
    let graph = collapsible(BaseGraph::linear(6));
    let edge = graph.node(1).unwrap().down_edges[0];
    assert_eq!(
        graph.long_fragment(&GraphElement::Edge(edge)),
        Some(Fragment::new(0, 5))
    );

    let base = BaseGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    let graph = collapsible(base);
    let edge = graph.node(0).unwrap().down_edges[0];
    assert_eq!(graph.long_fragment(&GraphElement::Edge(edge)), None);
}

#[test]
fn branch_filter_makes_merges_linear() {
    // Two branches 0..3 and 4..7 merging into 8 -> 9.
    let base = BaseGraph::from_edges(
        10,
        [(0, 1), (1, 2), (2, 3), (3, 8), (4, 5), (5, 6), (6, 7), (7, 8), (8, 9)],
    )
    .unwrap();
    let layout = Layout::build(&base, &[]);
    let branch = branch_visibility(&base, &[0]);
    let graph = MutableGraph::collapsible(
        Arc::new(base),
        Arc::new(layout),
        branch,
        ViewOptions::default(),
    )
    .unwrap();
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 5)));
}

#[test]
fn generator_exposes_chains_in_real_indices() {
    let graph = collapsible(BaseGraph::linear(6));
    let options = ViewOptions::default();
    let generator = FragmentGenerator::new(graph.graph(), &options);

    let chain = generator.long_down_fragment(0).unwrap();
    assert_eq!(
        chain,
        LinearChain {
            up: 0,
            down: 5,
            hidden: vec![1, 2, 3, 4]
        }
    );
    assert_eq!(chain.hops(), 5);
    assert_eq!(generator.long_up_fragment(5), Some(chain.clone()));
    assert_eq!(generator.fragment_through(3), Some(chain));

    let inner = generator.chain_between(1, 4).unwrap();
    assert_eq!(inner.hidden, vec![2, 3]);
    assert_eq!(generator.chain_between(1, 2), None);
    assert_eq!(generator.chain_between(4, 1), None);
}

#[test]
fn max_fragment_nodes_counts_commits_behind_hidden_edges() {
    let capped = |max| ViewOptions {
        max_fragment_nodes: Some(max),
        ..ViewOptions::default()
    };

    let mut graph = collapsible_with(BaseGraph::linear(8), &[], capped(3));
    graph.collapse(Fragment::new(2, 5)).unwrap();
    // 1 plus the two commits behind 2 -> 5 would exceed the cap.
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 2)));

    let mut graph = collapsible_with(BaseGraph::linear(8), &[], capped(4));
    graph.collapse(Fragment::new(2, 5)).unwrap();
    assert_eq!(graph.long_down_fragment(0).unwrap(), Some(Fragment::new(0, 3)));
}
