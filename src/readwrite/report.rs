//! Plain text diagnostic report of a contact graph.

use itertools::Itertools;
use std::io::{self, Write};

use crate::core::ContactGraph;

/// Write the graph statistics, the weight histogram and an adjacency dump in which every neighbour
/// is repeated once per contact.
pub fn write_report(graph: &ContactGraph, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "Nodes: {}", graph.n_nodes())?;
    writeln!(writer, "Edges: {}", graph.n_edges())?;
    writeln!(writer, "Tot Weight: {}", graph.total_weight())?;
    writeln!(writer, "Max Weight: {}", graph.max_weight())?;
    write!(writer, "W Hist: ")?;
    for count in graph.weight_histogram() {
        write!(writer, "{count} ")?;
    }
    writeln!(writer)?;

    for from in 0..graph.n_nodes() {
        // self contacts are part of the dump
        let row = (0..graph.n_nodes())
            .flat_map(|to| std::iter::repeat_n(to, graph.weight(from, to) as usize))
            .map(|to| format!("{to} "))
            .join("");
        writeln!(writer, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WeightOrder;

    #[test]
    fn report_of_weighted_path() {
        // (0,1) = 2, (1,2) = 1, (0,2) = 0
        let graph = ContactGraph::from_weights(3, &[2, 1, 0], WeightOrder::Diagonal).unwrap();
        let mut buffer = Vec::new();
        write_report(&graph, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Nodes: 3\nEdges: 2\nTot Weight: 3\nMax Weight: 2\nW Hist: 1 1 1 \n1 1 \n0 0 2 \n1 \n"
        );
    }

    #[test]
    fn report_of_empty_graph() {
        let graph = ContactGraph::new(2);
        let mut buffer = Vec::new();
        write_report(&graph, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Nodes: 2\nEdges: 0\nTot Weight: 0\nMax Weight: 0\nW Hist: 1 \n\n\n"
        );
    }
}
