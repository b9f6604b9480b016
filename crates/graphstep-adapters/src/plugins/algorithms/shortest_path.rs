//! Dijkstra's shortest path over weighted grids.
//!
//! Entering a cell costs that cell's weight; the start cell costs nothing.
//!
//! # Tie-break
//!
//! Among unvisited cells with equal tentative distance, the one with the
//! smallest row-major index is selected first. The priority queue orders
//! entries by `(distance, index)`, which fixes this rule independently of
//! insertion order, so traces are reproducible.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use graphstep_common::types::NodeId;
use graphstep_common::utils::error::Result;
use graphstep_core::GridGraph;

use super::path::reconstruct_path;
use super::snapshot::{Outcome, StepSnapshot};
use super::traits::{AlgorithmKind, Control, StepAlgorithm};

/// Stepwise Dijkstra from the grid's start cell to its end cell.
///
/// Each step settles exactly one cell.
#[derive(Debug, Clone)]
pub struct Dijkstra<'g> {
    grid: Cow<'g, GridGraph>,
    /// `None` is infinity.
    dist: Vec<Option<u64>>,
    prev: Vec<Option<NodeId>>,
    visited: Vec<bool>,
    order: Vec<NodeId>,
    /// Min-heap of `(distance, cell index)`; stale entries are skipped.
    heap: BinaryHeap<Reverse<(u64, usize)>>,
    active: Option<NodeId>,
    outcome: Option<Outcome>,
}

impl<'g> Dijkstra<'g> {
    /// Creates a search positioned before its first step.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the start or end marker is unusable.
    pub fn new(grid: Cow<'g, GridGraph>) -> Result<Self> {
        grid.validate()?;
        let n = grid.len();
        let start = grid.start().index();
        let mut dist = vec![None; n];
        dist[start] = Some(0);
        Ok(Self {
            dist,
            prev: vec![None; n],
            visited: vec![false; n],
            order: Vec::new(),
            heap: BinaryHeap::from([Reverse((0, start))]),
            active: None,
            outcome: None,
            grid,
        })
    }

    /// Tentative distance of a cell.
    #[must_use]
    pub fn distance(&self, id: NodeId) -> Option<u64> {
        self.dist[id.index()]
    }

    /// Pops the closest unvisited cell, skipping stale heap entries.
    fn closest(&mut self) -> Option<(u64, NodeId)> {
        while let Some(Reverse((d, index))) = self.heap.pop() {
            if !self.visited[index] && self.dist[index] == Some(d) {
                return Some((d, NodeId::new(index)));
            }
        }
        None
    }

    fn finish(&mut self, outcome: Outcome) -> Control {
        tracing::trace!(
            settled = self.order.len(),
            outcome = outcome.label(),
            "dijkstra finished"
        );
        self.outcome = Some(outcome.clone());
        Control::Done(outcome)
    }
}

impl StepAlgorithm for Dijkstra<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dijkstra
    }

    fn step(&mut self) -> Control {
        if let Some(outcome) = &self.outcome {
            return Control::Done(outcome.clone());
        }
        let Some((d, current)) = self.closest() else {
            self.active = None;
            return self.finish(Outcome::Unreachable);
        };
        self.visited[current.index()] = true;
        self.order.push(current);
        self.active = Some(current);

        if current == self.grid.end() {
            let path = reconstruct_path(&self.prev, current);
            return self.finish(Outcome::PathFound { path, cost: d });
        }

        for next in self.grid.neighbors(current) {
            if self.visited[next.index()] {
                continue;
            }
            let candidate = d + u64::from(self.grid.weight(next));
            if self.dist[next.index()].is_none_or(|known| candidate < known) {
                self.dist[next.index()] = Some(candidate);
                self.prev[next.index()] = Some(current);
                self.heap.push(Reverse((candidate, next.index())));
            }
        }
        Control::Continue
    }

    fn snapshot(&self) -> StepSnapshot {
        let mut snap = StepSnapshot::new(self.kind());
        snap.visited = self.order.clone();
        let mut frontier: Vec<(u64, usize)> = self
            .dist
            .iter()
            .enumerate()
            .filter(|&(i, _)| !self.visited[i])
            .filter_map(|(i, d)| d.map(|d| (d, i)))
            .collect();
        frontier.sort_unstable();
        snap.frontier = frontier.into_iter().map(|(_, i)| NodeId::new(i)).collect();
        snap.active = self.active;
        snap.distances = self.dist.clone();
        snap.cost = self.active.and_then(|a| self.dist[a.index()]);
        if let Some(Outcome::PathFound { path, cost }) = &self.outcome {
            snap.path = path.clone();
            snap.cost = Some(*cost);
        }
        snap
    }
}

/// Runs Dijkstra to completion.
///
/// # Errors
///
/// Returns a configuration error if the start or end marker is unusable.
pub fn dijkstra(grid: &GridGraph) -> Result<Outcome> {
    Ok(Dijkstra::new(Cow::Borrowed(grid))?.run_to_completion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::algorithms::traversal::bfs;
    use graphstep_common::types::Coord;
    use proptest::prelude::*;

    /// Exhaustive minimum cost by Bellman-Ford style relaxation.
    fn reference_cost(grid: &GridGraph) -> Option<u64> {
        let n = grid.len();
        let mut dist: Vec<Option<u64>> = vec![None; n];
        dist[grid.start().index()] = Some(0);
        for _ in 0..n {
            let mut changed = false;
            for i in 0..n {
                let id = NodeId::new(i);
                if grid.is_blocked(id) {
                    continue;
                }
                let Some(d) = dist[i] else { continue };
                for m in grid.neighbors(id) {
                    let c = d + u64::from(grid.weight(m));
                    if dist[m.index()].is_none_or(|k| c < k) {
                        dist[m.index()] = Some(c);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist[grid.end().index()]
    }

    #[test]
    fn test_uniform_grid_matches_bfs() {
        let grid = GridGraph::new(5, 5).unwrap();
        let outcome = dijkstra(&grid).unwrap();
        let Outcome::PathFound { path, cost } = &outcome else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 9);
        assert_eq!(*cost, 8);
        assert_eq!(outcome.hops(), bfs(&grid).unwrap().hops());
    }

    #[test]
    fn test_avoids_heavy_cells() {
        // 3x3, heavy middle column except the bottom row.
        let mut grid = GridGraph::new(3, 3).unwrap();
        grid.set_weight(Coord::new(0, 1), 9).unwrap();
        grid.set_weight(Coord::new(1, 1), 9).unwrap();
        let Outcome::PathFound { path, cost } = dijkstra(&grid).unwrap() else {
            panic!("expected a path");
        };
        assert_eq!(cost, 4);
        assert!(path.contains(&grid.id(Coord::new(2, 1)).unwrap()));
    }

    #[test]
    fn test_unreachable() {
        let mut grid = GridGraph::new(3, 3).unwrap();
        grid.toggle_wall(Coord::new(1, 2)).unwrap();
        grid.toggle_wall(Coord::new(2, 1)).unwrap();
        assert_eq!(dijkstra(&grid).unwrap(), Outcome::Unreachable);
    }

    #[test]
    fn test_tie_break_ascending_index() {
        let grid = GridGraph::new(3, 3).unwrap();
        let mut search = Dijkstra::new(Cow::Borrowed(&grid)).unwrap();
        search.step();
        // (0,1) index 1 and (1,0) index 3 both at distance 1.
        search.step();
        assert_eq!(search.snapshot().active, Some(NodeId::new(1)));
        search.step();
        assert_eq!(search.snapshot().active, Some(NodeId::new(3)));
    }

    #[test]
    fn test_snapshot_distances() {
        let grid = GridGraph::new(2, 3).unwrap();
        let mut search = Dijkstra::new(Cow::Borrowed(&grid)).unwrap();
        search.step();
        let snap = search.snapshot();
        assert_eq!(snap.distances[0], Some(0));
        assert_eq!(snap.distances[1], Some(1));
        assert_eq!(snap.distances[3], Some(1));
        assert_eq!(snap.distances[5], None);
        assert_eq!(snap.frontier, vec![NodeId::new(1), NodeId::new(3)]);
        assert!(snap.path.is_empty());
    }

    fn arb_weighted_grid() -> impl Strategy<Value = GridGraph> {
        (2usize..7, 2usize..7)
            .prop_flat_map(|(rows, cols)| {
                (
                    Just((rows, cols)),
                    proptest::collection::vec((1u32..6, 0u8..4), rows * cols),
                )
            })
            .prop_map(|((rows, cols), cells)| {
                let mut grid = GridGraph::new(rows, cols).unwrap();
                for (i, (weight, wall)) in cells.into_iter().enumerate() {
                    let c = Coord::new(i / cols, i % cols);
                    grid.set_weight(c, weight).unwrap();
                    if wall == 0 {
                        let _ = grid.toggle_wall(c);
                    }
                }
                grid
            })
    }

    /// Open grid with random walls and every weight left at 1.
    fn arb_uniform_grid() -> impl Strategy<Value = GridGraph> {
        (2usize..9, 2usize..9)
            .prop_flat_map(|(rows, cols)| {
                (
                    Just((rows, cols)),
                    proptest::collection::vec(0u8..3, rows * cols),
                )
            })
            .prop_map(|((rows, cols), walls)| {
                let mut grid = GridGraph::new(rows, cols).unwrap();
                for (i, wall) in walls.into_iter().enumerate() {
                    if wall == 0 {
                        let _ = grid.toggle_wall(Coord::new(i / cols, i % cols));
                    }
                }
                grid
            })
    }

    proptest! {
        #[test]
        fn prop_uniform_weight_matches_bfs(grid in arb_uniform_grid()) {
            let shortest = dijkstra(&grid).unwrap();
            let breadth = bfs(&grid).unwrap();
            prop_assert_eq!(shortest.hops(), breadth.hops());
            if let Outcome::PathFound { cost, .. } = &shortest {
                prop_assert_eq!(Some(*cost as usize), shortest.hops());
            } else {
                prop_assert_eq!(&shortest, &Outcome::Unreachable);
            }
        }

        #[test]
        fn prop_cost_is_minimal(grid in arb_weighted_grid()) {
            match dijkstra(&grid).unwrap() {
                Outcome::PathFound { path, cost } => {
                    prop_assert_eq!(Some(cost), reference_cost(&grid));
                    let summed: u64 = path.iter().skip(1).map(|&c| u64::from(grid.weight(c))).sum();
                    prop_assert_eq!(summed, cost);
                }
                Outcome::Unreachable => prop_assert_eq!(reference_cost(&grid), None),
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        #[test]
        fn prop_replay_is_identical(grid in arb_weighted_grid()) {
            let mut a = Dijkstra::new(Cow::Borrowed(&grid)).unwrap();
            let mut b = Dijkstra::new(Cow::Borrowed(&grid)).unwrap();
            let ta = crate::plugins::algorithms::traits::collect_trace(&mut a);
            let tb = crate::plugins::algorithms::traits::collect_trace(&mut b);
            prop_assert_eq!(ta, tb);
        }
    }
}
