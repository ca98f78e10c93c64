use itertools::Itertools;

use crate::simulation::{MultiStrainOutcome, RunOutcome, SirOutcome};

/// Trait extension to summarize the incidence of a run
pub trait IncidenceSummary {
    /// Number of new infections per step, starting with the seed.
    fn incidence(&self) -> &[usize];

    /// Step with the most new infections and their number. Ties resolve to the earliest step.
    fn peak(&self) -> (usize, usize) {
        self.incidence()
            .iter()
            .copied()
            .enumerate()
            .max_set_by_key(|&(_, count)| count)
            .first()
            .copied()
            .unwrap_or((0, 0))
    }

    /// Infections per node over the whole run. Reinfections count again, so the rate may exceed
    /// one in models without lasting immunity.
    fn attack_rate(&self, n_nodes: usize) -> f64 {
        if n_nodes == 0 {
            return 0.;
        }
        self.incidence().iter().sum::<usize>() as f64 / n_nodes as f64
    }
}

impl IncidenceSummary for SirOutcome {
    fn incidence(&self) -> &[usize] {
        &self.profile
    }
}

impl IncidenceSummary for MultiStrainOutcome {
    fn incidence(&self) -> &[usize] {
        &self.incidence
    }
}

impl IncidenceSummary for RunOutcome {
    fn incidence(&self) -> &[usize] {
        match self {
            RunOutcome::Sir(outcome) => outcome.incidence(),
            RunOutcome::MultiStrain(outcome) => outcome.incidence(),
        }
    }
}

/// Trait extension to describe the variant lineage of a multi strain run
pub trait LineageStatistics {
    /// Number of ancestors of every variant, zero for the root.
    fn lineage_depths(&self) -> Vec<usize>;

    /// Hamming distance of every variant genome to the root genome.
    fn root_distances(&self) -> Vec<usize>;

    /// Number of variants that infected at least one node.
    fn successful_variants(&self) -> usize;
}

impl LineageStatistics for MultiStrainOutcome {
    fn lineage_depths(&self) -> Vec<usize> {
        // parents always precede their children
        let mut depths: Vec<usize> = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            let depth = variant.parent.map_or(0, |parent| depths[parent] + 1);
            depths.push(depth);
        }
        depths
    }

    fn root_distances(&self) -> Vec<usize> {
        match self.variants.first() {
            Some(root) => self
                .variants
                .iter()
                .map(|variant| variant.genome.hamming(&root.genome))
                .collect(),
            None => Vec::new(),
        }
    }

    fn successful_variants(&self) -> usize {
        self.variants
            .iter()
            .filter(|variant| variant.profile.iter().any(|&count| count > 0))
            .count()
    }
}

/// Render a profile as a compact, `;` separated list.
pub fn format_profile(profile: &[usize]) -> String {
    profile.iter().join(";")
}
