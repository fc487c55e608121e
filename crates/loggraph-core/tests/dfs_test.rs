use loggraph_core::{BaseGraph, Dfs, NOT_LOADED, dfs};

fn first_unvisited_down(
    graph: &BaseGraph,
    visited: &[bool],
    node: usize,
) -> Option<usize> {
    graph
        .down_nodes(node)
        .iter()
        .copied()
        .find(|&d| d != NOT_LOADED && !visited[d])
}

#[test]
fn dfs_visits_in_preorder_and_backtracks() {
    // 0 -> 1 -> 3, 0 -> 2 -> 3
    let graph = BaseGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    let mut visited = vec![false; 4];
    let mut order = vec![0];
    visited[0] = true;
    dfs::walk(0, |node| {
        let next = first_unvisited_down(&graph, &visited, node)?;
        visited[next] = true;
        order.push(next);
        Some(next)
    });
    assert_eq!(order, vec![0, 1, 3, 2]);
}

#[test]
fn dfs_handles_very_deep_linear_history() {
    let n = 200_000;
    let graph = BaseGraph::linear(n);
    let mut visited = vec![false; n];
    visited[0] = true;
    let mut count = 1;
    Dfs::with_capacity(16).walk(0, |node| {
        let next = first_unvisited_down(&graph, &visited, node)?;
        visited[next] = true;
        count += 1;
        Some(next)
    });
    assert_eq!(count, n);
    assert!(visited.iter().all(|&v| v));
}

#[test]
fn dfs_driver_is_reusable() {
    let graph = BaseGraph::linear(5);
    let mut dfs = Dfs::new();
    for start in [3, 0] {
        let mut visited = vec![false; 5];
        visited[start] = true;
        dfs.walk(start, |node| {
            let next = first_unvisited_down(&graph, &visited, node)?;
            visited[next] = true;
            Some(next)
        });
        assert_eq!(visited.iter().filter(|&&v| v).count(), 5 - start);
    }
}

#[test]
fn dfs_skips_not_loaded_targets() {
    let graph = BaseGraph::from_edges(2, [(0, NOT_LOADED), (0, 1)]).unwrap();
    let mut visited = vec![false; 2];
    visited[0] = true;
    dfs::walk(0, |node| {
        let next = first_unvisited_down(&graph, &visited, node)?;
        visited[next] = true;
        Some(next)
    });
    assert_eq!(visited, vec![true, true]);
}
