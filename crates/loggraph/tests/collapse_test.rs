use loggraph::base::{BaseGraph, Error, Flags, Layout, NOT_LOADED};
use loggraph::{
    ActionResult, Edge, EdgeType, Fragment, GraphAction, GraphElement, MutableGraph, Node,
    ViewOptions,
};
use std::sync::Arc;

fn collapsible(base: BaseGraph) -> MutableGraph {
    let layout = Layout::build(&base, &[]);
    let all = Flags::new(base.node_count(), true);
    MutableGraph::collapsible(Arc::new(base), Arc::new(layout), all, ViewOptions::default())
        .unwrap()
}

fn snapshot(graph: &MutableGraph) -> Vec<Node> {
    (0..graph.node_count())
        .map(|row| graph.node(row).unwrap())
        .collect()
}

/// Every edge points at a live row (or unloaded history) and shows up on both of its ends.
fn assert_no_dangling_edges(graph: &MutableGraph) {
    let nodes = snapshot(graph);
    let rows = nodes.len();
    for node in &nodes {
        for edge in &node.down_edges {
            assert_eq!(edge.up_row, node.row);
            if edge.is_not_loaded() {
                assert_eq!(edge.kind, EdgeType::NotLoaded);
                continue;
            }
            assert!(edge.down_row < rows, "{edge:?} dangles");
            assert!(edge.up_row < edge.down_row);
            assert!(nodes[edge.down_row].up_edges.contains(edge));
        }
        for edge in &node.up_edges {
            assert_eq!(edge.down_row, node.row);
            assert!(edge.up_row < rows, "{edge:?} dangles");
            assert!(nodes[edge.up_row].down_edges.contains(edge));
        }
    }
}

#[test]
fn collapsing_linear_history_leaves_two_rows() {
    let mut graph = collapsible(BaseGraph::linear(6));
    let fragment = graph.long_down_fragment(0).unwrap().unwrap();
    assert_eq!(fragment, Fragment::new(0, 5));

    graph.collapse(fragment).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.real_index(1).unwrap(), 5);
    assert_eq!(graph.hidden_fragments(), vec![(0, 5)]);

    let hidden_edge = Edge {
        up_row: 0,
        down_row: 1,
        kind: EdgeType::HiddenFragment,
        layout_index: 1,
    };
    assert_eq!(graph.node(0).unwrap().down_edges, vec![hidden_edge]);
    assert_eq!(graph.node(1).unwrap().up_edges, vec![hidden_edge]);
    assert_no_dangling_edges(&graph);

    let result = graph.perform_action(GraphAction::Click(GraphElement::Edge(hidden_edge)));
    assert_eq!(result, ActionResult::Row(0));
    assert_eq!(graph.node_count(), 6);
    assert!(graph.hidden_fragments().is_empty());
    assert_no_dangling_edges(&graph);
}

#[test]
fn collapse_then_expand_restores_every_node() {
    // Linear runs hanging off a fork with a merge and unloaded history.
    let base = BaseGraph::from_edges(
        12,
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (0, 5),
            (5, 6),
            (6, 7),
            (4, 8),
            (7, 8),
            (8, 9),
            (9, 10),
            (10, 11),
            (11, NOT_LOADED),
        ],
    )
    .unwrap();
    let mut graph = collapsible(base);
    let before = snapshot(&graph);

    let fragments: Vec<Fragment> = (0..graph.node_count())
        .filter_map(|row| graph.long_down_fragment(row).unwrap())
        .collect();
    assert!(fragments.len() >= 2);

    for fragment in fragments {
        graph.collapse(fragment).unwrap();
        assert!(graph.node_count() < before.len());
        assert_no_dangling_edges(&graph);

        let up = graph.real_index(fragment.up_row).unwrap();
        let down = graph.real_index(fragment.up_row + 1).unwrap();
        graph.expand_real(up, down).unwrap();
        assert_eq!(snapshot(&graph), before);
    }
}

#[test]
fn nested_collapse_is_restored_on_expand() {
    let mut graph = collapsible(BaseGraph::linear(8));
    graph.collapse(Fragment::new(2, 5)).unwrap();
    assert_eq!(graph.node_count(), 6);
    let after_inner = snapshot(&graph);

    let outer = graph.long_down_fragment(0).unwrap().unwrap();
    assert_eq!(outer, Fragment::new(0, 5));
    graph.collapse(outer).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.hidden_fragments(), vec![(0, 7)]);
    assert_eq!(
        graph.projection().hidden_edges().unwrap().hidden_node_count(),
        6
    );
    assert_no_dangling_edges(&graph);

    graph.expand(Fragment::new(0, 1)).unwrap();
    assert_eq!(graph.hidden_fragments(), vec![(2, 5)]);
    assert_eq!(snapshot(&graph), after_inner);

    graph.expand(Fragment::new(2, 3)).unwrap();
    assert_eq!(graph.node_count(), 8);
}

#[test]
fn invalid_fragments_are_rejected_without_side_effects() {
    let base = BaseGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    let mut graph = collapsible(base);
    let before = snapshot(&graph);

    assert_eq!(
        graph.collapse(Fragment::new(0, 3)).unwrap_err(),
        Error::NotAFragment { up: 0, down: 3 }
    );
    assert_eq!(
        graph.collapse(Fragment::new(0, 1)).unwrap_err(),
        Error::NotAFragment { up: 0, down: 1 }
    );
    assert_eq!(
        graph.expand(Fragment::new(0, 3)).unwrap_err(),
        Error::NotCollapsed { up: 0, down: 3 }
    );
    assert!(matches!(
        graph.collapse(Fragment::new(0, 9)),
        Err(Error::RowOutOfRange { row: 9, len: 4 })
    ));
    assert_eq!(snapshot(&graph), before);
}

#[test]
fn non_collapsible_projections_refuse_structure_changes() {
    let base = Arc::new(BaseGraph::linear(4));
    let layout = Arc::new(Layout::build(&base, &[]));
    let mut graph =
        MutableGraph::passthrough(base, layout, ViewOptions::default()).unwrap();

    assert_eq!(
        graph.collapse(Fragment::new(0, 3)).unwrap_err(),
        Error::Unsupported {
            operation: "collapse",
            projection: "passthrough"
        }
    );
    assert!(graph.expand_all().is_err());
    assert!(graph.collapse_linear_branches().is_err());
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn collapse_linear_branches_folds_every_run() {
    // Two branches 0..3 and 4..7 merging into 8 -> 9.
    let base = BaseGraph::from_edges(
        10,
        [(0, 1), (1, 2), (2, 3), (3, 8), (4, 5), (5, 6), (6, 7), (7, 8), (8, 9)],
    )
    .unwrap();
    let mut graph = collapsible(base);

    assert_eq!(graph.collapse_linear_branches().unwrap(), 2);
    assert_eq!(graph.hidden_fragments(), vec![(0, 3), (4, 7)]);
    assert_eq!(graph.node_count(), 6);
    assert_no_dangling_edges(&graph);

    // Nothing left to fold.
    assert_eq!(graph.collapse_linear_branches().unwrap(), 0);

    graph.expand_all().unwrap();
    assert_eq!(graph.node_count(), 10);
    assert!(graph.hidden_fragments().is_empty());
}

#[test]
fn hidden_rows_resolve_to_no_row() {
    let mut graph = collapsible(BaseGraph::linear(6));
    graph.collapse(Fragment::new(0, 5)).unwrap();
    assert_eq!(graph.row_of(3), None);
    assert_eq!(graph.row_of(5), Some(1));
    assert_eq!(graph.hash(1).unwrap(), "5");
}
