//! Weighted contact network
//!
//! The `ContactGraph` stores a dense, symmetric adjacency table over a fixed population. An entry
//! is the number of redundant contacts between two nodes, where zero means the nodes are not
//! adjacent. Engines read weights verbatim, no normalization is applied.
//!
//! Graphs are built either from an upper triangular weight list or from a line oriented adjacency
//! list. Both enumerations are reproduced exactly, such that a weight list can be re-derived from
//! the adjacency table.

use serde::{Deserialize, Serialize};
use std::io::BufRead;

use crate::errors::{Result, SimulationError};

/// Enumeration order of the unordered node pairs in a weight list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightOrder {
    /// Pairs ordered by increasing node distance, then by row: (0,1), (1,2), ..., (0,2), ...
    #[default]
    Diagonal,
    /// Pairs ordered by row, then by column: (0,1), (0,2), ..., (1,2), ...
    RowMajor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactGraph {
    n_nodes: usize,
    n_edges: usize,
    total_weight: u64,
    max_weight: u32,
    adjacency: Vec<u32>,
}

/// Unordered node pairs `(row, col)` with `row < col` in the given order.
fn upper_pairs(n_nodes: usize, order: WeightOrder) -> Vec<(usize, usize)> {
    match order {
        WeightOrder::Diagonal => (1..n_nodes)
            .flat_map(|offset| (0..n_nodes - offset).map(move |row| (row, row + offset)))
            .collect(),
        WeightOrder::RowMajor => (0..n_nodes)
            .flat_map(|row| (row + 1..n_nodes).map(move |col| (row, col)))
            .collect(),
    }
}

impl ContactGraph {
    /// Construct a graph without any edges.
    pub fn new(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            n_edges: 0,
            total_weight: 0,
            max_weight: 0,
            adjacency: vec![0; n_nodes * n_nodes],
        }
    }

    /// Construct a graph from a symmetric weight list of length `n * (n - 1) / 2`.
    pub fn from_weights(n_nodes: usize, weights: &[u32], order: WeightOrder) -> Result<Self> {
        let expected = n_nodes * n_nodes.saturating_sub(1) / 2;
        if weights.len() != expected {
            return Err(SimulationError::ConfigurationError(format!(
                "{n_nodes} nodes require {expected} weights, but {} were supplied",
                weights.len()
            )));
        }

        let mut graph = Self::new(n_nodes);
        for ((row, col), &weight) in upper_pairs(n_nodes, order).into_iter().zip(weights) {
            graph.set_weight(row, col, weight);
            if weight > 0 {
                graph.n_edges += 1;
            }
            graph.total_weight += weight as u64;
            graph.max_weight = graph.max_weight.max(weight);
        }
        Ok(graph)
    }

    /// Construct a graph from an adjacency list.
    ///
    /// The first line holds the number of nodes and the second line is ignored. Line `i` after
    /// them lists the destinations of node `i`, where repeated destinations add to the weight of
    /// the contact. Every listed contact
    /// counts towards the total weight and every first occurrence of a directed contact counts as
    /// an edge. Afterwards, asymmetric pairs are set to the larger of both directions and their
    /// absolute difference is added to the total weight.
    pub fn from_adjacency_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or_else(|| {
            SimulationError::InputFormatError("Adjacency list is empty".to_string())
        })??;
        let n_nodes: usize = header.trim().parse().map_err(|_| {
            SimulationError::InputFormatError(format!("Invalid node count: {}", header.trim()))
        })?;

        // separator line between header and rows
        lines.next().transpose()?;

        let mut graph = Self::new(n_nodes);
        for (from, line) in lines.enumerate() {
            let line = line?;
            if from >= n_nodes {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(SimulationError::InputFormatError(format!(
                    "Adjacency list has more rows than its {n_nodes} nodes"
                )));
            }
            for token in line.split_whitespace() {
                let to: usize = token.parse().map_err(|_| {
                    SimulationError::InputFormatError(format!(
                        "Invalid destination {token} for node {from}"
                    ))
                })?;
                if to >= n_nodes {
                    return Err(SimulationError::InputFormatError(format!(
                        "Destination {to} of node {from} exceeds node count {n_nodes}"
                    )));
                }
                let entry = &mut graph.adjacency[from * n_nodes + to];
                if *entry == 0 {
                    graph.n_edges += 1;
                }
                *entry += 1;
                graph.total_weight += 1;
            }
        }

        // symmetrize by the larger direction
        for (row, col) in upper_pairs(n_nodes, WeightOrder::RowMajor) {
            let forward = graph.weight(row, col);
            let backward = graph.weight(col, row);
            if forward != backward {
                graph.total_weight += forward.abs_diff(backward) as u64;
                graph.set_weight(row, col, forward.max(backward));
            }
            graph.max_weight = graph.max_weight.max(graph.weight(row, col));
        }

        log::debug!(
            "Loaded adjacency list with {} nodes, {} edges and total weight {}",
            graph.n_nodes,
            graph.n_edges,
            graph.total_weight
        );
        Ok(graph)
    }

    fn set_weight(&mut self, a: usize, b: usize, weight: u32) {
        self.adjacency[a * self.n_nodes + b] = weight;
        self.adjacency[b * self.n_nodes + a] = weight;
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Number of contacts between `a` and `b`, zero if they are not adjacent.
    pub fn weight(&self, a: usize, b: usize) -> u32 {
        self.adjacency[a * self.n_nodes + b]
    }

    /// Iterate over all adjacent nodes of `node` with their contact weights, in node order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let row = &self.adjacency[node * self.n_nodes..(node + 1) * self.n_nodes];
        row.iter()
            .enumerate()
            .filter(move |&(neighbor, &weight)| neighbor != node && weight > 0)
            .map(|(neighbor, &weight)| (neighbor, weight))
    }

    /// Count the unordered node pairs by weight, including the non-adjacent pairs in bucket zero.
    pub fn weight_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0; self.max_weight as usize + 1];
        for (row, col) in upper_pairs(self.n_nodes, WeightOrder::RowMajor) {
            histogram[self.weight(row, col) as usize] += 1;
        }
        histogram
    }

    /// Re-derive the weight list of the graph in the given order.
    pub fn weights(&self, order: WeightOrder) -> Vec<u32> {
        upper_pairs(self.n_nodes, order)
            .into_iter()
            .map(|(row, col)| self.weight(row, col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_enumeration() {
        // 4 nodes: (0,1) (1,2) (2,3) (0,2) (1,3) (0,3)
        let graph = ContactGraph::from_weights(4, &[1, 2, 3, 4, 5, 6], WeightOrder::Diagonal)
            .unwrap();
        assert_eq!(graph.weight(0, 1), 1);
        assert_eq!(graph.weight(1, 2), 2);
        assert_eq!(graph.weight(2, 3), 3);
        assert_eq!(graph.weight(0, 2), 4);
        assert_eq!(graph.weight(1, 3), 5);
        assert_eq!(graph.weight(3, 0), 6);
        assert_eq!(graph.n_edges(), 6);
        assert_eq!(graph.total_weight(), 21);
        assert_eq!(graph.max_weight(), 6);
    }

    #[test]
    fn row_major_enumeration() {
        // 4 nodes: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        let graph =
            ContactGraph::from_weights(4, &[1, 0, 3, 0, 5, 6], WeightOrder::RowMajor).unwrap();
        assert_eq!(graph.weight(0, 1), 1);
        assert_eq!(graph.weight(0, 2), 0);
        assert_eq!(graph.weight(3, 0), 3);
        assert_eq!(graph.weight(2, 1), 0);
        assert_eq!(graph.weight(1, 3), 5);
        assert_eq!(graph.weight(2, 3), 6);
        assert_eq!(graph.n_edges(), 4);
    }

    #[test]
    fn weight_list_round_trip() {
        let weights = vec![3, 0, 1, 1, 0, 2, 0, 0, 4, 1];
        for order in [WeightOrder::Diagonal, WeightOrder::RowMajor] {
            let graph = ContactGraph::from_weights(5, &weights, order).unwrap();
            assert_eq!(graph.weights(order), weights);
        }
    }

    #[test]
    fn weight_list_length_mismatch() {
        let result = ContactGraph::from_weights(4, &[1, 1, 1], WeightOrder::Diagonal);
        assert!(matches!(
            result,
            Err(SimulationError::ConfigurationError(_))
        ));
    }

    #[test]
    fn symmetric_adjacency() {
        let graph =
            ContactGraph::from_weights(4, &[1, 1, 1, 0, 0, 1], WeightOrder::Diagonal).unwrap();
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(graph.weight(a, b), graph.weight(b, a));
            }
        }
    }

    #[test]
    fn neighbors_skip_missing_edges() {
        // cycle 0-1-2-3-0
        let graph =
            ContactGraph::from_weights(4, &[1, 1, 1, 0, 0, 1], WeightOrder::Diagonal).unwrap();
        let neighbors: Vec<(usize, u32)> = graph.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 1), (3, 1)]);
        let neighbors: Vec<(usize, u32)> = graph.neighbors(2).collect();
        assert_eq!(neighbors, vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn histogram() {
        let graph =
            ContactGraph::from_weights(4, &[1, 2, 1, 0, 0, 2], WeightOrder::Diagonal).unwrap();
        assert_eq!(graph.weight_histogram(), vec![2, 2, 2]);
    }

    #[test]
    fn adjacency_list_symmetrizes() {
        let input = "3\n\n1 1 2\n0\n\n";
        let graph = ContactGraph::from_adjacency_list(input.as_bytes()).unwrap();

        // 0->1 twice, 1->0 once: max wins
        assert_eq!(graph.weight(0, 1), 2);
        assert_eq!(graph.weight(1, 0), 2);
        // 0->2 once, 2->0 never
        assert_eq!(graph.weight(0, 2), 1);
        assert_eq!(graph.weight(2, 0), 1);
        assert_eq!(graph.weight(1, 2), 0);

        // directed first occurrences: 0->1, 0->2, 1->0
        assert_eq!(graph.n_edges(), 3);
        // four listed contacts plus the differences |2 - 1| and |1 - 0|
        assert_eq!(graph.total_weight(), 6);
        assert_eq!(graph.max_weight(), 2);
        assert_eq!(graph.weight_histogram(), vec![1, 1, 1]);
    }

    #[test]
    fn adjacency_list_to_weights() {
        let input = "4\n\n1 3\n0 2\n1 3\n2 0\n";
        let graph = ContactGraph::from_adjacency_list(input.as_bytes()).unwrap();
        assert_eq!(graph.weights(WeightOrder::Diagonal), vec![1, 1, 1, 0, 0, 1]);
        assert_eq!(graph.total_weight(), 8);
    }

    #[test]
    fn adjacency_list_rejects_malformed_input() {
        let empty = ContactGraph::from_adjacency_list("".as_bytes());
        assert!(matches!(empty, Err(SimulationError::InputFormatError(_))));

        let header = ContactGraph::from_adjacency_list("three\n".as_bytes());
        assert!(matches!(header, Err(SimulationError::InputFormatError(_))));

        let token = ContactGraph::from_adjacency_list("2\n\n1 x\n".as_bytes());
        assert!(matches!(token, Err(SimulationError::InputFormatError(_))));

        let range = ContactGraph::from_adjacency_list("2\n\n5\n".as_bytes());
        assert!(matches!(range, Err(SimulationError::InputFormatError(_))));

        let rows = ContactGraph::from_adjacency_list("1\n\n0\n0\n".as_bytes());
        assert!(matches!(rows, Err(SimulationError::InputFormatError(_))));
    }

    #[test]
    fn adjacency_list_skips_line_after_header() {
        // star around node 0, second line carries no destinations
        let input = "3\n\n1 2\n0\n0\n";
        let graph = ContactGraph::from_adjacency_list(input.as_bytes()).unwrap();
        assert_eq!(graph.weights(WeightOrder::RowMajor), vec![1, 1, 0]);
        assert_eq!(graph.n_edges(), 4);
        assert_eq!(graph.total_weight(), 4);

        // content of the second line never becomes a row
        let input = "2\n1 1 1\n1\n0\n";
        let graph = ContactGraph::from_adjacency_list(input.as_bytes()).unwrap();
        assert_eq!(graph.weight(0, 1), 1);
        assert_eq!(graph.total_weight(), 2);
    }

    #[test]
    fn adjacency_list_header_only() {
        let graph = ContactGraph::from_adjacency_list("2\n".as_bytes()).unwrap();
        assert_eq!(graph.n_nodes(), 2);
        assert_eq!(graph.n_edges(), 0);
    }
}
