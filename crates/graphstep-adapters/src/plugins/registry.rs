//! Builds algorithm state machines from a graph model.

use std::borrow::Cow;

use graphstep_common::utils::error::{ConfigurationError, Result};
use graphstep_core::{GraphModel, GridGraph, NetworkGraph};

use super::algorithms::{
    AlgorithmKind, CycleDetector, Dijkstra, GreedyColoring, Kruskal, StepAlgorithm, Traversal,
};
use super::traits::Parameters;

/// Creates a boxed algorithm that owns a private copy of `graph`.
///
/// The returned run never observes later changes to `graph`.
///
/// # Errors
///
/// Returns a configuration error if the algorithm does not run on this
/// graph shape or the graph fails the algorithm's preconditions.
pub fn create_algorithm(
    kind: AlgorithmKind,
    graph: &GraphModel,
    params: &Parameters,
) -> Result<Box<dyn StepAlgorithm + Send + 'static>> {
    let algorithm: Box<dyn StepAlgorithm + Send> = match kind {
        AlgorithmKind::Bfs => Box::new(Traversal::bfs(owned_grid(kind, graph)?)?),
        AlgorithmKind::Dfs => Box::new(Traversal::dfs(owned_grid(kind, graph)?)?),
        AlgorithmKind::Dijkstra => Box::new(Dijkstra::new(owned_grid(kind, graph)?)?),
        AlgorithmKind::GreedyColoring => {
            let network = owned_network(kind, graph)?;
            let palette = params.palette_for(&network);
            Box::new(GreedyColoring::new(network, palette)?)
        }
        AlgorithmKind::Kruskal => Box::new(Kruskal::new(owned_network(kind, graph)?)),
        AlgorithmKind::CycleDetection => {
            let network = owned_network(kind, graph)?;
            let directed = params.directed_for(&network);
            Box::new(CycleDetector::new(network, directed))
        }
    };
    tracing::debug!(algorithm = %kind, nodes = graph.node_count(), "algorithm created");
    Ok(algorithm)
}

fn wrong_kind(kind: AlgorithmKind) -> ConfigurationError {
    ConfigurationError::WrongGraphKind {
        algorithm: kind.name(),
        expected: kind.graph_kind(),
    }
}

fn owned_grid(kind: AlgorithmKind, graph: &GraphModel) -> Result<Cow<'static, GridGraph>> {
    let grid = graph.as_grid().ok_or_else(|| wrong_kind(kind))?;
    Ok(Cow::Owned(grid.clone()))
}

fn owned_network(kind: AlgorithmKind, graph: &GraphModel) -> Result<Cow<'static, NetworkGraph>> {
    let network = graph.as_network().ok_or_else(|| wrong_kind(kind))?;
    Ok(Cow::Owned(network.clone()))
}
