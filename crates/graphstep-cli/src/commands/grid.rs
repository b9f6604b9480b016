//! Grid searches: open grids and generated mazes.

use anyhow::{Context, Result};
use graphstep::generate::{maze, random_weights};
use graphstep::{AlgorithmKind, Coord, EditOp, GridGraph, Outcome, RunOptions, StepEngine};

use super::{Pacing, drive};
use crate::output::{self, Format};
use crate::{GridAlgorithm, GridArgs};

/// Parses `ROW,COL`.
pub fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row '{row}': {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column '{col}': {e}"))?;
    Ok(Coord::new(row, col))
}

/// Run a search on an open grid.
pub fn run_open(rows: usize, cols: usize, args: &GridArgs, pacing: &Pacing) -> Result<()> {
    let grid = GridGraph::new(rows, cols)?;
    search(grid, args, pacing)
}

/// Run a search on a generated maze.
pub fn run_maze(rows: usize, cols: usize, seed: u64, args: &GridArgs, pacing: &Pacing) -> Result<()> {
    let grid = maze(rows, cols, seed)?;
    output::status(
        &format!("maze {rows}x{cols} (seed {seed}), {} open cells", grid.open_cell_count()),
        pacing.quiet || matches!(pacing.format, Format::Json),
    );
    search(grid, args, pacing)
}

fn search(mut grid: GridGraph, args: &GridArgs, pacing: &Pacing) -> Result<()> {
    if let Some(max) = args.random_weights {
        random_weights(&mut grid, max, args.weight_seed)?;
    }

    let mut engine = pacing.engine();
    engine.configure(grid);
    apply_edits(&mut engine, args)?;

    let kind = match args.algorithm {
        GridAlgorithm::Bfs => AlgorithmKind::Bfs,
        GridAlgorithm::Dfs => AlgorithmKind::Dfs,
        GridAlgorithm::Dijkstra => AlgorithmKind::Dijkstra,
    };
    let last = drive(&mut engine, kind, RunOptions::default(), pacing)?;

    match pacing.format {
        Format::Json => output::print_json(&last, pacing.quiet)?,
        Format::Table => {
            let grid = engine
                .graph()
                .and_then(|g| g.as_grid())
                .context("engine lost its grid")?;
            let outcome = last.status.outcome();
            let mut items = vec![
                ("Algorithm", kind.to_string()),
                ("Status", output::status_label(&last.status)),
                ("Steps", last.step.to_string()),
                ("Visited", last.visited.len().to_string()),
            ];
            if let Some(Outcome::PathFound { cost, .. }) = outcome {
                items.push(("Path cells", last.path.len().to_string()));
                items.push(("Cost", cost.to_string()));
            }
            output::print_key_value_table(&items, pacing.quiet);
            if !pacing.quiet {
                print!("{}", output::render_grid(grid, &last));
            }
        }
    }
    Ok(())
}

fn apply_edits(engine: &mut StepEngine, args: &GridArgs) -> Result<()> {
    let edits = args
        .start
        .map(EditOp::SetStart)
        .into_iter()
        .chain(args.end.map(EditOp::SetEnd))
        .chain(args.walls.iter().copied().map(EditOp::ToggleWall));
    for op in edits {
        let name = op.name();
        engine
            .edit(op)
            .with_context(|| format!("cannot apply {name}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("2,3").unwrap(), Coord::new(2, 3));
        assert_eq!(parse_coord(" 4 , 0").unwrap(), Coord::new(4, 0));
        assert!(parse_coord("2;3").is_err());
        assert!(parse_coord("a,1").is_err());
    }
}
