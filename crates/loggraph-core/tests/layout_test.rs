use loggraph_core::{BaseGraph, Error, Layout};

fn diamond() -> BaseGraph {
    // 0 -> 1 -> 3, 0 -> 2 -> 3
    BaseGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap()
}

#[test]
fn build_opens_a_lane_per_fork() {
    let layout = Layout::build(&diamond(), &[]);
    let lanes: Vec<u32> = (0..4).map(|i| layout.layout_index(i)).collect();
    assert_eq!(lanes, vec![1, 1, 2, 1]);
    assert_eq!(layout.heads(), &[0]);
    assert!(layout.is_head(0));
    assert!(!layout.is_head(3));
    assert_eq!(layout.layout_index(99), 0);
}

#[test]
fn build_processes_branch_heads_first() {
    let graph = BaseGraph::linear(5);
    let layout = Layout::build(&graph, &[2]);
    let lanes: Vec<u32> = (0..5).map(|i| layout.layout_index(i)).collect();
    assert_eq!(lanes, vec![2, 2, 1, 1, 1]);
    assert_eq!(layout.heads(), &[2, 0]);
    assert!(layout.is_head(2));
    assert_eq!(layout.head_of(3), Some(2));
    assert_eq!(layout.head_of(1), Some(0));
}

#[test]
fn build_ignores_out_of_range_and_repeated_heads() {
    let graph = BaseGraph::linear(3);
    let layout = Layout::build(&graph, &[7, 0, 0]);
    assert_eq!(layout.heads(), &[0]);
    assert_eq!(layout.len(), 3);
}

#[test]
fn every_parentless_node_is_a_head() {
    // Two independent roots merging into 2.
    let graph = BaseGraph::from_edges(4, [(0, 2), (1, 2), (2, 3)]).unwrap();
    let layout = Layout::build(&graph, &[]);
    assert_eq!(layout.heads(), &[0, 1]);
    assert_eq!(layout.layout_index(0), 1);
    assert_eq!(layout.layout_index(2), 1);
    assert_eq!(layout.layout_index(1), 2);
    assert_eq!(layout.head_of(3), Some(0));
}

#[test]
fn from_indices_validates_and_derives_ownership() {
    let graph = diamond();
    let layout = Layout::from_indices(&graph, vec![1, 1, 2, 1], vec![0]).unwrap();
    assert_eq!(layout.layout_index(2), 2);
    assert_eq!(layout.head_of(3), Some(0));

    assert_eq!(
        Layout::from_indices(&graph, vec![1, 1], vec![0]).unwrap_err(),
        Error::SizeMismatch {
            what: "layout",
            expected: 4,
            actual: 2
        }
    );
    assert_eq!(
        Layout::from_indices(&graph, vec![1; 4], vec![4]).unwrap_err(),
        Error::NodeOutOfRange { index: 4, len: 4 }
    );
}
