use itertools::Itertools;
use std::fs;
use std::io::{self, BufReader, Write};

use crate::core::{ContactGraph, WeightOrder};
use crate::errors::{Result, SimulationError};

pub trait GraphIO: Sized {
    fn read_adjacency_list(path: &str) -> Result<Self>;
    fn read_weight_list(path: &str, n_nodes: usize, order: WeightOrder) -> Result<Self>;
    fn write_weight_list(&self, writer: &mut impl Write, order: WeightOrder) -> io::Result<()>;
}

impl GraphIO for ContactGraph {
    /// Reads a graph from a file holding the number of nodes and a separator line, followed by one
    /// line of neighbours per node.
    fn read_adjacency_list(path: &str) -> Result<ContactGraph> {
        let file = fs::File::open(path).map_err(|err| {
            SimulationError::InputFormatError(format!("Failed to read from {path}: {err}"))
        })?;
        let graph = ContactGraph::from_adjacency_list(BufReader::new(file))?;
        log::info!(
            "Loaded contact graph from {path} with {} nodes and {} edges",
            graph.n_nodes(),
            graph.n_edges()
        );
        Ok(graph)
    }

    /// Reads a graph from a file holding whitespace separated weights of all unordered node pairs.
    fn read_weight_list(path: &str, n_nodes: usize, order: WeightOrder) -> Result<ContactGraph> {
        let content = fs::read_to_string(path).map_err(|err| {
            SimulationError::InputFormatError(format!("Failed to read from {path}: {err}"))
        })?;
        let weights = parse_weights(&content)?;
        let graph = ContactGraph::from_weights(n_nodes, &weights, order)?;
        log::info!(
            "Loaded contact graph from {path} with {} nodes and {} edges",
            graph.n_nodes(),
            graph.n_edges()
        );
        Ok(graph)
    }

    fn write_weight_list(&self, writer: &mut impl Write, order: WeightOrder) -> io::Result<()> {
        writeln!(writer, "{}", self.weights(order).iter().join(" "))
    }
}

fn parse_weights(content: &str) -> Result<Vec<u32>> {
    content
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| {
                SimulationError::InputFormatError(format!("Failed to parse weight: {token}"))
            })
        })
        .collect()
}
