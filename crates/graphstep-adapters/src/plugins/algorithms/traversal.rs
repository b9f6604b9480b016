//! Breadth-first and depth-first search over grids.
//!
//! Both searches share one state machine and differ only in the frontier
//! discipline. Each step takes one cell off the frontier, marks it visited
//! and expands its open neighbors in up, right, down, left order.

use std::borrow::Cow;
use std::collections::VecDeque;

use graphstep_common::types::NodeId;
use graphstep_common::utils::error::Result;
use graphstep_core::GridGraph;
use smallvec::SmallVec;

use super::path::reconstruct_path;
use super::snapshot::{Outcome, StepSnapshot};
use super::traits::{AlgorithmKind, Control, StepAlgorithm};

/// Frontier discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontier {
    /// FIFO queue: breadth-first, minimum hop count.
    Queue,
    /// LIFO stack: depth-first, no length guarantee.
    Stack,
}

/// Stepwise BFS/DFS from the grid's start cell to its end cell.
#[derive(Debug, Clone)]
pub struct Traversal<'g> {
    grid: Cow<'g, GridGraph>,
    discipline: Frontier,
    frontier: VecDeque<NodeId>,
    /// BFS: cell already queued. Prevents duplicate queue entries.
    discovered: Vec<bool>,
    visited: Vec<bool>,
    order: Vec<NodeId>,
    prev: Vec<Option<NodeId>>,
    active: Option<NodeId>,
    outcome: Option<Outcome>,
}

impl<'g> Traversal<'g> {
    /// Creates a traversal positioned before its first step.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the start or end marker is unusable.
    pub fn new(grid: Cow<'g, GridGraph>, discipline: Frontier) -> Result<Self> {
        grid.validate()?;
        let n = grid.len();
        let start = grid.start();
        let mut discovered = vec![false; n];
        discovered[start.index()] = true;
        Ok(Self {
            frontier: VecDeque::from([start]),
            discipline,
            discovered,
            visited: vec![false; n],
            order: Vec::new(),
            prev: vec![None; n],
            active: None,
            outcome: None,
            grid,
        })
    }

    /// Breadth-first traversal.
    ///
    /// # Errors
    ///
    /// See [`Traversal::new`].
    pub fn bfs(grid: Cow<'g, GridGraph>) -> Result<Self> {
        Self::new(grid, Frontier::Queue)
    }

    /// Depth-first traversal.
    ///
    /// # Errors
    ///
    /// See [`Traversal::new`].
    pub fn dfs(grid: Cow<'g, GridGraph>) -> Result<Self> {
        Self::new(grid, Frontier::Stack)
    }

    /// Cells visited so far, in order.
    #[must_use]
    pub fn visited(&self) -> &[NodeId] {
        &self.order
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self.discipline {
            Frontier::Queue => self.frontier.pop_front(),
            Frontier::Stack => self.frontier.pop_back(),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Control {
        tracing::trace!(
            algorithm = %self.kind(),
            visited = self.order.len(),
            outcome = outcome.label(),
            "traversal finished"
        );
        self.outcome = Some(outcome.clone());
        Control::Done(outcome)
    }
}

impl StepAlgorithm for Traversal<'_> {
    fn kind(&self) -> AlgorithmKind {
        match self.discipline {
            Frontier::Queue => AlgorithmKind::Bfs,
            Frontier::Stack => AlgorithmKind::Dfs,
        }
    }

    fn step(&mut self) -> Control {
        if let Some(outcome) = &self.outcome {
            return Control::Done(outcome.clone());
        }
        loop {
            let Some(current) = self.pop() else {
                self.active = None;
                return self.finish(Outcome::NoPath);
            };
            // Stack entries go stale when a cell is pushed twice.
            if self.visited[current.index()] {
                continue;
            }
            self.visited[current.index()] = true;
            self.order.push(current);
            self.active = Some(current);

            if current == self.grid.end() {
                let path = reconstruct_path(&self.prev, current);
                let cost = (path.len() - 1) as u64;
                return self.finish(Outcome::PathFound { path, cost });
            }

            let neighbors = self.grid.neighbors(current);
            match self.discipline {
                Frontier::Queue => {
                    for next in neighbors {
                        if !self.discovered[next.index()] {
                            self.discovered[next.index()] = true;
                            self.prev[next.index()] = Some(current);
                            self.frontier.push_back(next);
                        }
                    }
                }
                Frontier::Stack => {
                    let fresh: SmallVec<[NodeId; 4]> = neighbors
                        .into_iter()
                        .filter(|n| !self.visited[n.index()])
                        .collect();
                    // Reverse so the first neighbor in direction order is popped first.
                    for &next in fresh.iter().rev() {
                        self.prev[next.index()] = Some(current);
                        self.frontier.push_back(next);
                    }
                }
            }
            return Control::Continue;
        }
    }

    fn snapshot(&self) -> StepSnapshot {
        let mut snap = StepSnapshot::new(self.kind());
        snap.visited = self.order.clone();
        let pending = self.frontier.iter().filter(|n| !self.visited[n.index()]);
        snap.frontier = match self.discipline {
            Frontier::Queue => pending.copied().collect(),
            Frontier::Stack => {
                // A cell pushed twice is listed once, at its topmost entry.
                let mut listed = vec![false; self.visited.len()];
                pending
                    .rev()
                    .filter(|n| !std::mem::replace(&mut listed[n.index()], true))
                    .copied()
                    .collect()
            }
        };
        snap.active = self.active;
        if let Some(Outcome::PathFound { path, cost }) = &self.outcome {
            snap.path = path.clone();
            snap.cost = Some(*cost);
        }
        snap
    }
}

/// Runs BFS to completion.
///
/// # Errors
///
/// Returns a configuration error if the start or end marker is unusable.
pub fn bfs(grid: &GridGraph) -> Result<Outcome> {
    Ok(Traversal::bfs(Cow::Borrowed(grid))?.run_to_completion())
}

/// Runs DFS to completion.
///
/// # Errors
///
/// Returns a configuration error if the start or end marker is unusable.
pub fn dfs(grid: &GridGraph) -> Result<Outcome> {
    Ok(Traversal::dfs(Cow::Borrowed(grid))?.run_to_completion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::algorithms::traits::collect_trace;
    use crate::plugins::algorithms::snapshot::RunStatus;
    use graphstep_common::types::Coord;
    use proptest::prelude::*;

    fn path_len(outcome: &Outcome) -> Option<usize> {
        match outcome {
            Outcome::PathFound { path, .. } => Some(path.len()),
            _ => None,
        }
    }

    /// Reference unweighted shortest path length in cells.
    fn reference_len(grid: &GridGraph) -> Option<usize> {
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::from([grid.start()]);
        dist[grid.start().index()] = 1;
        while let Some(n) = queue.pop_front() {
            for m in grid.neighbors(n) {
                if dist[m.index()] == usize::MAX {
                    dist[m.index()] = dist[n.index()] + 1;
                    queue.push_back(m);
                }
            }
        }
        let d = dist[grid.end().index()];
        (d != usize::MAX).then_some(d)
    }

    fn assert_valid_path(grid: &GridGraph, path: &[NodeId]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.end()));
        for pair in path.windows(2) {
            assert!(!grid.is_blocked(pair[1]));
            assert_eq!(grid.coord(pair[0]).manhattan(grid.coord(pair[1])), 1);
        }
    }

    #[test]
    fn test_bfs_open_grid() {
        let grid = GridGraph::new(5, 5).unwrap();
        let outcome = bfs(&grid).unwrap();
        assert_eq!(path_len(&outcome), Some(9));
        assert_eq!(outcome.hops(), Some(8));
        if let Outcome::PathFound { path, cost } = &outcome {
            assert_eq!(*cost, 8);
            assert_valid_path(&grid, path);
        }
    }

    #[test]
    fn test_dfs_finds_valid_path() {
        let grid = GridGraph::new(5, 5).unwrap();
        let outcome = dfs(&grid).unwrap();
        let Outcome::PathFound { path, .. } = outcome else {
            panic!("expected a path");
        };
        assert_valid_path(&grid, &path);
        assert!(path.len() >= 9);
    }

    #[test]
    fn test_walled_off_end_is_no_path() {
        let mut grid = GridGraph::new(4, 4).unwrap();
        grid.toggle_wall(Coord::new(2, 3)).unwrap();
        grid.toggle_wall(Coord::new(3, 2)).unwrap();
        assert_eq!(bfs(&grid).unwrap(), Outcome::NoPath);
        assert_eq!(dfs(&grid).unwrap(), Outcome::NoPath);
    }

    #[test]
    fn test_each_step_visits_one_cell() {
        let grid = GridGraph::new(3, 3).unwrap();
        let mut bfs = Traversal::bfs(Cow::Borrowed(&grid)).unwrap();
        let trace = collect_trace(&mut bfs);
        for (i, snap) in trace.iter().enumerate() {
            assert_eq!(snap.visited.len(), i + 1);
            assert_eq!(snap.step, i + 1);
        }
        let last = trace.last().unwrap();
        assert!(matches!(last.status, RunStatus::Finished(Outcome::PathFound { .. })));
        assert_eq!(last.path.len(), 5);
        assert!(trace[..trace.len() - 1].iter().all(|s| s.path.is_empty()));
    }

    #[test]
    fn test_bfs_frontier_is_fifo() {
        let grid = GridGraph::new(3, 3).unwrap();
        let mut bfs = Traversal::bfs(Cow::Borrowed(&grid)).unwrap();
        assert_eq!(bfs.step(), Control::Continue);
        // From (0,0): right (0,1), then down (1,0).
        assert_eq!(bfs.snapshot().frontier, vec![NodeId::new(1), NodeId::new(3)]);
    }

    #[test]
    fn test_dfs_prefers_first_direction() {
        let grid = GridGraph::new(3, 3).unwrap();
        let mut dfs = Traversal::dfs(Cow::Borrowed(&grid)).unwrap();
        dfs.step();
        dfs.step();
        // Right is tried before down.
        assert_eq!(dfs.visited(), &[NodeId::new(0), NodeId::new(1)]);
    }

    #[test]
    fn test_dfs_frontier_lists_each_cell_once() {
        let grid = GridGraph::new(3, 3).unwrap();
        let mut search = Traversal::dfs(Cow::Borrowed(&grid)).unwrap();
        // Visits 0, 1, 2, 5; cell 4 is pushed from both 1 and 5.
        for _ in 0..4 {
            assert_eq!(search.step(), Control::Continue);
        }
        assert_eq!(search.snapshot().active, Some(NodeId::new(5)));
        assert_eq!(
            search.snapshot().frontier,
            vec![NodeId::new(8), NodeId::new(4), NodeId::new(3)]
        );
    }

    #[test]
    fn test_done_is_sticky() {
        let grid = GridGraph::new(2, 2).unwrap();
        let mut bfs = Traversal::bfs(Cow::Borrowed(&grid)).unwrap();
        let outcome = bfs.run_to_completion();
        assert_eq!(bfs.step(), Control::Done(outcome));
    }

    #[test]
    fn test_moved_markers() {
        let mut grid = GridGraph::new(3, 3).unwrap();
        grid.set_start(Coord::new(1, 1)).unwrap();
        grid.toggle_wall(Coord::new(0, 0)).unwrap();
        let outcome = bfs(&grid).unwrap();
        assert_eq!(outcome.hops(), Some(2));

        let bordered = GridGraph::bordered(4, 4).unwrap();
        assert_eq!(bfs(&bordered).unwrap().hops(), Some(2));
    }

    fn arb_grid() -> impl Strategy<Value = GridGraph> {
        (2usize..9, 2usize..9)
            .prop_flat_map(|(rows, cols)| {
                (
                    Just((rows, cols)),
                    proptest::collection::vec(any::<bool>(), rows * cols),
                )
            })
            .prop_map(|((rows, cols), walls)| {
                let mut grid = GridGraph::new(rows, cols).unwrap();
                for (i, wall) in walls.into_iter().enumerate() {
                    // Roughly one in three toggles; markers are rejected.
                    if wall && i % 3 == 0 {
                        let _ = grid.toggle_wall(Coord::new(i / cols, i % cols));
                    }
                }
                grid
            })
    }

    proptest! {
        #[test]
        fn prop_bfs_is_shortest_and_not_longer_than_dfs(grid in arb_grid()) {
            let b = bfs(&grid).unwrap();
            let d = dfs(&grid).unwrap();
            prop_assert_eq!(path_len(&b), reference_len(&grid));
            prop_assert_eq!(path_len(&b).is_some(), path_len(&d).is_some());
            if let (Some(bl), Some(dl)) = (path_len(&b), path_len(&d)) {
                prop_assert!(bl <= dl);
            }
        }

        #[test]
        fn prop_visited_never_exceeds_open_cells(grid in arb_grid()) {
            for discipline in [Frontier::Queue, Frontier::Stack] {
                let mut t = Traversal::new(Cow::Borrowed(&grid), discipline).unwrap();
                t.run_to_completion();
                prop_assert!(t.visited().len() <= grid.open_cell_count());
                let mut sorted = t.visited().to_vec();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(sorted.len(), t.visited().len());
            }
        }
    }
}
