extern crate strainspread;

use rand::prelude::*;
use strainspread::config::{MultiStrainParameters, SirParameters};
use strainspread::core::{ContactGraph, ImmunityMode, WeightOrder};
use strainspread::simulation::{MultiStrainSimulation, SirSimulation};
use strainspread::stats::{IncidenceSummary, LineageStatistics};

fn main() {
    // ring of 200 nodes with doubled contacts to the second neighbour
    let n_nodes = 200;
    let n_pairs = n_nodes * (n_nodes - 1) / 2;
    let mut weights: Vec<u32> = vec![0; n_pairs];
    weights[..n_nodes - 1].fill(1);
    weights[n_nodes - 1..2 * n_nodes - 3].fill(2);
    weights[n_pairs - 3] = 2;
    weights[n_pairs - 2] = 2;
    weights[n_pairs - 1] = 1;
    let graph = ContactGraph::from_weights(n_nodes, &weights, WeightOrder::Diagonal).unwrap();

    println!("---sir---");
    let mut sir = SirSimulation::new(
        &graph,
        &SirParameters {
            transmissibility: 0.4,
        },
        StdRng::seed_from_u64(7),
    )
    .unwrap();
    let outcome = sir.run(0, 1_000).unwrap();
    println!("steps: {} ({})", outcome.steps, outcome.termination);
    println!("total infected: {}", outcome.total_infected);
    println!("peak: {:?}", outcome.peak());

    println!("---multi strain---");
    let parameters = MultiStrainParameters {
        transmissibility: 0.4,
        coupled: false,
        mutation_probability: 0.05,
        max_variants: 10_000,
        immunity_mode: ImmunityMode::Waning,
        immunity_strength: 20,
        genome_length: 50,
        initial_ones: 10,
        min_edits: 1,
        max_edits: 3,
        transmissibility_drift: 0.1,
    };
    let simulation =
        MultiStrainSimulation::new(&graph, parameters, StdRng::seed_from_u64(7)).unwrap();
    let outcome = simulation.run(0, 500).unwrap();
    println!("steps: {} ({})", outcome.steps, outcome.termination);
    println!("total infected: {}", outcome.total_infected);
    println!("attack rate: {:.2}", outcome.attack_rate(n_nodes));
    println!("variants: {}", outcome.variants.len());
    println!("successful variants: {}", outcome.successful_variants());
    println!(
        "max lineage depth: {:?}",
        outcome.lineage_depths().into_iter().max()
    );
    println!("severity: {:?}", outcome.severity);
}
