//! Output formatting for CLI commands.

use comfy_table::{Cell, Color, ContentArrangement, Table};
use graphstep::{GridGraph, RunStatus, StepSnapshot};
use serde::Serialize;

/// Output format selection.
#[derive(Clone, Copy)]
pub enum Format {
    Table,
    Json,
}

impl From<crate::OutputFormat> for Format {
    fn from(f: crate::OutputFormat) -> Self {
        match f {
            crate::OutputFormat::Table => Format::Table,
            crate::OutputFormat::Json => Format::Json,
        }
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(data: &T, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}

/// Create a styled table with consistent formatting.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table
}

/// Add a header row to a table.
pub fn add_header(table: &mut Table, headers: &[&str]) {
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
}

/// Print a key-value table.
pub fn print_key_value_table(items: &[(&str, String)], quiet: bool) {
    if quiet {
        return;
    }
    let mut table = create_table();
    add_header(&mut table, &["Property", "Value"]);
    for (key, value) in items {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    println!("{table}");
}

/// Human-readable status line.
pub fn status_label(status: &RunStatus) -> String {
    match status {
        RunStatus::Running => "running".to_string(),
        RunStatus::Finished(outcome) => outcome.label().to_string(),
        RunStatus::Cancelled => "cancelled".to_string(),
        RunStatus::Aborted { reason } => format!("aborted ({reason})"),
    }
}

/// One-line summary of a snapshot, for `--steps`.
pub fn snapshot_line(snapshot: &StepSnapshot) -> String {
    let mut line = format!(
        "step {:>4}  {:<16} visited {:>4}  frontier {:>4}",
        snapshot.step,
        status_label(&snapshot.status),
        snapshot.visited.len(),
        snapshot.frontier.len(),
    );
    if let Some(active) = snapshot.active {
        line.push_str(&format!("  active {active}"));
    }
    if let Some(edge) = snapshot.active_edge {
        line.push_str(&format!("  edge {edge}"));
    }
    if let Some(cost) = snapshot.cost {
        line.push_str(&format!("  cost {cost}"));
    }
    line
}

/// Draws a grid with the snapshot's visited cells and path.
///
/// `#` wall, `S` start, `E` end, `*` path, `.` visited.
pub fn render_grid(grid: &GridGraph, snapshot: &StepSnapshot) -> String {
    let mut cells = vec![' '; grid.len()];
    for id in &snapshot.visited {
        cells[id.index()] = '.';
    }
    for id in &snapshot.path {
        cells[id.index()] = '*';
    }
    for (i, cell) in grid.cells().iter().enumerate() {
        if cell.blocked {
            cells[i] = '#';
        }
    }
    cells[grid.start().index()] = 'S';
    cells[grid.end().index()] = 'E';

    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in cells.chunks(grid.cols()) {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Print a status message (respects quiet mode).
pub fn status(msg: &str, quiet: bool) {
    if !quiet {
        println!("{msg}");
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("✗ {msg}");
}
