//! Seeded puzzle generators.
//!
//! Every generator takes an explicit seed and uses [`StdRng`], so the same
//! seed always yields the same puzzle.

use graphstep_common::types::{Coord, Direction, NodeId, Weight};
use graphstep_common::utils::error::{ConfigurationError, Result};
use graphstep_common::utils::hash::FxHashSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::GridGraph;
use super::network::NetworkGraph;

/// Carves a perfect maze into a bordered grid.
///
/// Uses a randomized depth-first backtracker over the odd-indexed interior
/// cells. Start is `(1, 1)`; end is the bottom-right carved cell. Every
/// open cell is reachable from every other open cell along exactly one path.
///
/// # Errors
///
/// Returns a configuration error if the grid is smaller than 5x5, which
/// leaves no room for two carved cells.
pub fn maze(rows: usize, cols: usize, seed: u64) -> Result<GridGraph> {
    if rows < 5 || cols < 5 {
        return Err(ConfigurationError::DegenerateGraph(format!(
            "a {rows}x{cols} maze needs at least 5x5 cells"
        ))
        .into());
    }
    let mut grid = GridGraph::bordered(rows, cols)?;
    for index in 0..grid.len() {
        grid.set_blocked_raw(NodeId::new(index), true);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let last_row = odd_at_most(rows - 2);
    let last_col = odd_at_most(cols - 2);
    let carve = |grid: &mut GridGraph, c: Coord| {
        if let Some(id) = grid.id(c) {
            grid.set_blocked_raw(id, false);
        }
    };

    let origin = Coord::new(1, 1);
    carve(&mut grid, origin);
    let mut stack = vec![origin];
    while let Some(&here) = stack.last() {
        let mut candidates: Vec<(Coord, Coord)> = Vec::with_capacity(4);
        for dir in Direction::ORDER {
            let Some(between) = here.step(dir, rows, cols) else {
                continue;
            };
            let Some(next) = between.step(dir, rows, cols) else {
                continue;
            };
            let inside = (1..=last_row).contains(&next.row) && (1..=last_col).contains(&next.col);
            let fresh = grid.id(next).is_some_and(|id| grid.is_blocked(id));
            if inside && fresh {
                candidates.push((between, next));
            }
        }
        match candidates.choose(&mut rng) {
            Some(&(between, next)) => {
                carve(&mut grid, between);
                carve(&mut grid, next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    let start = grid.id(origin).unwrap_or(grid.start());
    let end = grid.id(Coord::new(last_row, last_col)).unwrap_or(grid.end());
    grid.set_markers_raw(start, end);
    Ok(grid)
}

fn odd_at_most(n: usize) -> usize {
    if n % 2 == 1 { n } else { n - 1 }
}

/// Assigns every open cell a weight drawn from `1..=max_weight`.
///
/// # Errors
///
/// Returns a configuration error if `max_weight` is zero.
pub fn random_weights(grid: &mut GridGraph, max_weight: Weight, seed: u64) -> Result<()> {
    if max_weight == 0 {
        return Err(ConfigurationError::DegenerateGraph("maximum weight must be positive".into()).into());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for index in 0..grid.len() {
        let id = NodeId::new(index);
        if !grid.is_blocked(id) {
            grid.set_weight_raw(id, rng.gen_range(1..=max_weight));
        }
    }
    Ok(())
}

/// Builds a connected undirected network.
///
/// Node `i` (for `i > 0`) is linked to a random earlier node, which makes a
/// spanning tree; then up to `extra_edges` further distinct pairs are added.
/// Weights are drawn from `1..=max_weight`.
///
/// # Errors
///
/// Returns a configuration error for fewer than two nodes or a zero maximum
/// weight.
pub fn random_network(
    nodes: usize,
    extra_edges: usize,
    max_weight: Weight,
    seed: u64,
) -> Result<NetworkGraph> {
    if nodes < 2 {
        return Err(ConfigurationError::DegenerateGraph(format!("{nodes} nodes cannot form a network")).into());
    }
    if max_weight == 0 {
        return Err(ConfigurationError::DegenerateGraph("maximum weight must be positive".into()).into());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = NetworkGraph::new();
    for i in 0..nodes {
        graph.add_node(default_label(i));
    }

    let mut linked: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
    let pair = |a: NodeId, b: NodeId| if a < b { (a, b) } else { (b, a) };

    for i in 1..nodes {
        let parent = NodeId::new(rng.gen_range(0..i));
        let child = NodeId::new(i);
        graph.add_edge(parent, child, rng.gen_range(1..=max_weight))?;
        linked.insert(pair(parent, child));
    }

    let max_pairs = nodes * (nodes - 1) / 2;
    let target = (nodes - 1 + extra_edges).min(max_pairs);
    let mut attempts = 0;
    while graph.edge_count() < target && attempts < extra_edges * 32 {
        attempts += 1;
        let a = NodeId::new(rng.gen_range(0..nodes));
        let b = NodeId::new(rng.gen_range(0..nodes));
        if a == b || !linked.insert(pair(a, b)) {
            continue;
        }
        graph.add_edge(a, b, rng.gen_range(1..=max_weight))?;
    }
    Ok(graph)
}

/// Spreadsheet-style label for a node index: A..Z, AA, AB, ...
#[must_use]
pub fn default_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reachable_count(grid: &GridGraph) -> usize {
        let mut seen = vec![false; grid.len()];
        let mut stack = vec![grid.start()];
        seen[grid.start().index()] = true;
        let mut count = 0;
        while let Some(id) = stack.pop() {
            count += 1;
            for n in grid.neighbors(id) {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    stack.push(n);
                }
            }
        }
        count
    }

    #[test]
    fn test_default_label() {
        assert_eq!(default_label(0), "A");
        assert_eq!(default_label(25), "Z");
        assert_eq!(default_label(26), "AA");
        assert_eq!(default_label(27), "AB");
    }

    #[test]
    fn test_maze_is_deterministic() {
        let a = maze(11, 15, 7).unwrap();
        let b = maze(11, 15, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_maze_too_small() {
        assert!(maze(4, 9, 1).is_err());
    }

    #[test]
    fn test_random_weights_range() {
        let mut grid = GridGraph::new(6, 6).unwrap();
        random_weights(&mut grid, 5, 3).unwrap();
        assert!(grid.cells().iter().all(|c| (1..=5).contains(&c.weight)));
        assert!(random_weights(&mut grid, 0, 3).is_err());
    }

    proptest! {
        #[test]
        fn prop_maze_is_valid(rows in 5usize..16, cols in 5usize..16, seed in any::<u64>()) {
            let grid = maze(rows, cols, seed).unwrap();
            prop_assert!(grid.validate().is_ok());
            for index in 0..grid.len() {
                let id = NodeId::new(index);
                if grid.is_border(grid.coord(id)) {
                    prop_assert!(grid.is_blocked(id));
                }
            }
            // Perfect maze: every open cell reachable from the start.
            prop_assert_eq!(reachable_count(&grid), grid.open_cell_count());
        }

        #[test]
        fn prop_random_network_is_connected(nodes in 2usize..12, extra in 0usize..10, seed in any::<u64>()) {
            let graph = random_network(nodes, extra, 9, seed).unwrap();
            prop_assert_eq!(graph.node_count(), nodes);
            prop_assert!(graph.edge_count() >= nodes - 1);
            let adj = graph.adjacency(false);
            let mut seen = vec![false; nodes];
            let mut stack = vec![0usize];
            seen[0] = true;
            while let Some(n) = stack.pop() {
                for &(_, m) in &adj[n] {
                    if !seen[m.index()] {
                        seen[m.index()] = true;
                        stack.push(m.index());
                    }
                }
            }
            prop_assert!(seen.iter().all(|&s| s));
        }
    }
}
