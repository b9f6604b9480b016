//! Network games: coloring, spanning trees and cycle detection.

use anyhow::{Context, Result, bail};
use graphstep::generate::random_network;
use graphstep::{
    AlgorithmKind, ColorIndex, EdgeId, EditOp, NetworkGraph, Outcome, RunOptions, StepEngine,
    Weight,
};

use super::{Pacing, drive};
use crate::NetworkArgs;
use crate::output::{self, Format};

/// An edge given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub src: String,
    pub dst: String,
    pub weight: Weight,
}

/// A manual color assignment given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignSpec {
    pub node: String,
    pub color: usize,
}

/// Parses `A-B` or `A-B:WEIGHT`.
pub fn parse_edge(s: &str) -> Result<EdgeSpec, String> {
    let (pair, weight) = match s.split_once(':') {
        Some((pair, w)) => (pair, w.trim().parse().map_err(|e| format!("bad weight '{w}': {e}"))?),
        None => (s, 1),
    };
    let (src, dst) = pair
        .split_once('-')
        .ok_or_else(|| format!("expected A-B, got '{s}'"))?;
    let (src, dst) = (src.trim(), dst.trim());
    if src.is_empty() || dst.is_empty() {
        return Err(format!("empty node label in '{s}'"));
    }
    Ok(EdgeSpec {
        src: src.to_string(),
        dst: dst.to_string(),
        weight,
    })
}

/// Parses `LABEL=COLOR`.
pub fn parse_assign(s: &str) -> Result<AssignSpec, String> {
    let (node, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=COLOR, got '{s}'"))?;
    Ok(AssignSpec {
        node: node.trim().to_string(),
        color: color
            .trim()
            .parse()
            .map_err(|e| format!("bad color '{color}': {e}"))?,
    })
}

/// Builds the network from explicit edges, or generates one.
fn build(args: &NetworkArgs) -> Result<NetworkGraph> {
    if args.edges.is_empty() {
        return Ok(random_network(args.nodes, args.extra_edges, args.max_weight, args.seed)?);
    }
    let mut graph = NetworkGraph::new();
    for spec in &args.edges {
        let src = node_or_insert(&mut graph, &spec.src);
        let dst = node_or_insert(&mut graph, &spec.dst);
        graph
            .add_edge(src, dst, spec.weight)
            .with_context(|| format!("cannot add edge {}-{}", spec.src, spec.dst))?;
    }
    Ok(graph)
}

fn node_or_insert(graph: &mut NetworkGraph, label: &str) -> graphstep::NodeId {
    match graph.find_node(label) {
        Some(id) => id,
        None => graph.add_node(label),
    }
}

fn find_edge(graph: &NetworkGraph, spec: &EdgeSpec) -> Result<EdgeId> {
    let (Some(a), Some(b)) = (graph.find_node(&spec.src), graph.find_node(&spec.dst)) else {
        bail!("unknown node in edge {}-{}", spec.src, spec.dst);
    };
    graph
        .edges()
        .iter()
        .find(|e| (e.src == a && e.dst == b) || (e.src == b && e.dst == a))
        .map(|e| e.id)
        .with_context(|| format!("no edge between {} and {}", spec.src, spec.dst))
}

fn labels(graph: &NetworkGraph) -> Vec<&str> {
    graph.nodes().iter().map(|n| n.label.as_str()).collect()
}

fn network<'a>(engine: &'a StepEngine) -> Result<&'a NetworkGraph> {
    engine
        .graph()
        .and_then(|g| g.as_network())
        .context("engine lost its network")
}

/// Run the coloring game.
pub fn color(
    args: &NetworkArgs,
    palette: Option<usize>,
    assignments: &[AssignSpec],
    pacing: &Pacing,
) -> Result<()> {
    let mut graph = build(args)?;
    if let Some(palette) = palette {
        graph = graph.with_palette_size(palette);
    }
    let mut engine = pacing.engine();
    engine.configure(graph);

    if !assignments.is_empty() {
        for spec in assignments {
            let node = network(&engine)?
                .find_node(&spec.node)
                .with_context(|| format!("unknown node {}", spec.node))?;
            engine.edit(EditOp::AssignManualColor {
                node,
                color: ColorIndex::new(spec.color),
            })?;
        }
        let status = engine.coloring_status()?;
        return match pacing.format {
            Format::Json => output::print_json(&status, pacing.quiet),
            Format::Table => {
                let net = network(&engine)?;
                let conflicts: Vec<&str> = status
                    .conflicts
                    .iter()
                    .filter_map(|&n| net.label(n))
                    .collect();
                output::print_key_value_table(
                    &[
                        ("Complete", status.complete.to_string()),
                        ("Uncolored", status.uncolored.to_string()),
                        ("Colors used", status.colors_used.to_string()),
                        ("Conflicts", conflicts.join(", ")),
                    ],
                    pacing.quiet,
                );
                Ok(())
            }
        };
    }

    let last = drive(&mut engine, AlgorithmKind::GreedyColoring, RunOptions::default(), pacing)?;
    match pacing.format {
        Format::Json => output::print_json(&last, pacing.quiet)?,
        Format::Table => {
            let net = network(&engine)?;
            let mut items = vec![
                ("Status", output::status_label(&last.status)),
                ("Steps", last.step.to_string()),
            ];
            match last.status.outcome() {
                Some(Outcome::Colored { colors_used, .. }) => {
                    items.push(("Colors used", colors_used.to_string()));
                }
                Some(Outcome::NoColorAvailable { node }) => {
                    items.push(("Stuck at", net.label(*node).unwrap_or("?").to_string()));
                }
                _ => {}
            }
            output::print_key_value_table(&items, pacing.quiet);
            if !pacing.quiet {
                let mut table = output::create_table();
                output::add_header(&mut table, &["Node", "Color"]);
                for (label, color) in labels(net).into_iter().zip(&last.colors) {
                    let color = color.map_or_else(|| "-".to_string(), |c| c.index().to_string());
                    table.add_row(vec![label.to_string(), color]);
                }
                println!("{table}");
            }
        }
    }
    Ok(())
}

/// Run the spanning-tree game.
pub fn mst(args: &NetworkArgs, selection: &[EdgeSpec], pacing: &Pacing) -> Result<()> {
    let mut engine = pacing.engine();
    engine.configure(build(args)?);

    if !selection.is_empty() {
        for spec in selection {
            let edge = find_edge(network(&engine)?, spec)?;
            engine.edit(EditOp::ToggleEdgeSelection(edge))?;
        }
        let verdict = engine.evaluate_selection()?;
        return match pacing.format {
            Format::Json => output::print_json(&verdict, pacing.quiet),
            Format::Table => {
                output::print_key_value_table(
                    &[
                        ("Valid", verdict.valid.to_string()),
                        ("Reason", verdict.reason.clone().unwrap_or_default()),
                        ("Your cost", verdict.user_cost.to_string()),
                        ("Minimum cost", verdict.mst_cost.to_string()),
                        (
                            "Efficiency",
                            verdict
                                .efficiency
                                .map_or_else(|| "-".to_string(), |e| format!("{:.0}%", e * 100.0)),
                        ),
                    ],
                    pacing.quiet,
                );
                Ok(())
            }
        };
    }

    let last = drive(&mut engine, AlgorithmKind::Kruskal, RunOptions::default(), pacing)?;
    match pacing.format {
        Format::Json => output::print_json(&last, pacing.quiet)?,
        Format::Table => {
            let net = network(&engine)?;
            let mut items = vec![
                ("Status", output::status_label(&last.status)),
                ("Steps", last.step.to_string()),
            ];
            if let Some(Outcome::SpanningTree { total_weight, .. }) = last.status.outcome() {
                items.push(("Total weight", total_weight.to_string()));
            }
            output::print_key_value_table(&items, pacing.quiet);
            print_edges(net, &last.selected_edges, pacing.quiet);
        }
    }
    Ok(())
}

/// Run the cycle-detection game.
pub fn cycle(args: &NetworkArgs, directed: bool, pacing: &Pacing) -> Result<()> {
    let mut engine = pacing.engine();
    engine.configure(build(args)?);
    let options = RunOptions::default().directed(directed);
    let last = drive(&mut engine, AlgorithmKind::CycleDetection, options, pacing)?;
    match pacing.format {
        Format::Json => output::print_json(&last, pacing.quiet)?,
        Format::Table => {
            output::print_key_value_table(
                &[
                    ("Mode", if directed { "directed" } else { "undirected" }.to_string()),
                    ("Status", output::status_label(&last.status)),
                    ("Steps", last.step.to_string()),
                ],
                pacing.quiet,
            );
            print_edges(network(&engine)?, &last.cycle_edges, pacing.quiet);
        }
    }
    Ok(())
}

fn print_edges(graph: &NetworkGraph, edges: &[EdgeId], quiet: bool) {
    if quiet || edges.is_empty() {
        return;
    }
    let mut table = output::create_table();
    output::add_header(&mut table, &["Edge", "From", "To", "Weight"]);
    for edge in edges.iter().filter_map(|&id| graph.edge(id)) {
        table.add_row(vec![
            edge.id.to_string(),
            graph.label(edge.src).unwrap_or("?").to_string(),
            graph.label(edge.dst).unwrap_or("?").to_string(),
            edge.weight.to_string(),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            parse_edge("A-B").unwrap(),
            EdgeSpec {
                src: "A".into(),
                dst: "B".into(),
                weight: 1
            }
        );
        assert_eq!(parse_edge("A-C:7").unwrap().weight, 7);
        assert!(parse_edge("AB").is_err());
        assert!(parse_edge("A-").is_err());
        assert!(parse_edge("A-B:x").is_err());
    }

    #[test]
    fn test_parse_assign() {
        let spec = parse_assign("Hub=2").unwrap();
        assert_eq!(spec.node, "Hub");
        assert_eq!(spec.color, 2);
        assert!(parse_assign("Hub").is_err());
    }

    #[test]
    fn test_build_from_edges() {
        let args = NetworkArgs {
            edges: vec![parse_edge("A-B").unwrap(), parse_edge("B-C:4").unwrap()],
            nodes: 0,
            extra_edges: 0,
            max_weight: 1,
            seed: 0,
        };
        let graph = build(&args).unwrap();
        assert_eq!(graph.edges()[1].weight, 4);
        assert_eq!(labels(&graph), vec!["A", "B", "C"]);
        let spec = parse_edge("C-B").unwrap();
        assert!(find_edge(&graph, &spec).is_ok());
    }
}
