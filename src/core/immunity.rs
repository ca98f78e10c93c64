//! Partial, per locus immunity of hosts
//!
//! Every node carries an `Immunity` vector with one protective strength per genome locus. An
//! infection sets the strength at all loci where the infecting genome carries a `1`, and waning
//! decrements all positive strengths by one per susceptible step. A locus covers an exposure as
//! long as its strength is nonzero.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::genome::Genome;

/// Source of the protective strength assigned on infection.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmunityMode {
    /// Infections leave no protection.
    #[display("none")]
    None,
    /// Infections protect with strength one, forever.
    #[default]
    #[display("static")]
    Static,
    /// Infections protect with a configurable strength that decays while susceptible.
    #[display("waning")]
    Waning,
}

impl ImmunityMode {
    /// Base protective strength of the mode.
    pub fn base_strength(&self, strength: u32) -> u32 {
        match self {
            ImmunityMode::None => 0,
            ImmunityMode::Static => 1,
            ImmunityMode::Waning => strength,
        }
    }

    /// Strength assigned to the seed node for the root variant.
    pub fn seed_strength(&self, strength: u32) -> u32 {
        match self {
            ImmunityMode::Waning => strength.saturating_add(1),
            _ => self.base_strength(strength),
        }
    }

    /// Strength assigned to a node on a fresh infection.
    pub fn infection_strength(&self, strength: u32) -> u32 {
        match self {
            ImmunityMode::Waning => strength.saturating_add(2),
            _ => self.base_strength(strength),
        }
    }

    /// Whether protection decays while susceptible.
    pub fn wanes(&self) -> bool {
        matches!(self, ImmunityMode::Waning)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Immunity {
    strengths: Vec<u32>,
}

impl Immunity {
    /// Construct an immunity vector without any protection.
    pub fn new(length: usize) -> Self {
        Self {
            strengths: vec![0; length],
        }
    }

    pub fn strengths(&self) -> &[u32] {
        &self.strengths
    }

    /// Overwrite the strength at every locus where the genome carries a `1`.
    pub fn apply(&mut self, genome: &Genome, strength: u32) {
        for locus in genome.iter_ones() {
            self.strengths[locus] = strength;
        }
    }

    /// Decrement every positive strength by one.
    pub fn decay(&mut self) {
        self.strengths
            .iter_mut()
            .filter(|strength| **strength > 0)
            .for_each(|strength| *strength -= 1);
    }

    pub fn is_covered(&self, locus: usize) -> bool {
        self.strengths[locus] > 0
    }

    /// Number of loci where the genome carries a `1` that is not covered.
    pub fn uncovered(&self, genome: &Genome) -> usize {
        genome
            .iter_ones()
            .filter(|&locus| !self.is_covered(locus))
            .count()
    }

    pub fn reset(&mut self) {
        self.strengths.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites() {
        let mut immunity = Immunity::new(5);
        immunity.apply(&Genome::from_ones(5, &[0, 1]), 4);
        immunity.apply(&Genome::from_ones(5, &[1, 3]), 2);
        assert_eq!(immunity.strengths(), &[4, 2, 0, 2, 0]);
    }

    #[test]
    fn decay_stops_at_zero() {
        let mut immunity = Immunity::new(3);
        immunity.apply(&Genome::from_ones(3, &[0, 2]), 2);
        immunity.decay();
        assert_eq!(immunity.strengths(), &[1, 0, 1]);
        immunity.decay();
        immunity.decay();
        assert_eq!(immunity.strengths(), &[0, 0, 0]);
    }

    #[test]
    fn uncovered_loci() {
        let mut immunity = Immunity::new(6);
        immunity.apply(&Genome::from_ones(6, &[0, 1, 2]), 1);
        let genome = Genome::from_ones(6, &[1, 2, 4, 5]);
        assert!(immunity.is_covered(1));
        assert!(!immunity.is_covered(4));
        assert_eq!(immunity.uncovered(&genome), 2);
        assert_eq!(immunity.uncovered(&Genome::from_ones(6, &[0, 2])), 0);
    }

    #[test]
    fn mode_strengths() {
        assert_eq!(ImmunityMode::None.base_strength(5), 0);
        assert_eq!(ImmunityMode::None.seed_strength(5), 0);
        assert_eq!(ImmunityMode::None.infection_strength(5), 0);
        assert_eq!(ImmunityMode::Static.base_strength(5), 1);
        assert_eq!(ImmunityMode::Static.seed_strength(5), 1);
        assert_eq!(ImmunityMode::Static.infection_strength(5), 1);
        assert!(!ImmunityMode::Static.wanes());
    }

    #[test]
    fn waning_seed_and_infection_offsets() {
        // the seed gets one extra unit, later infections get two
        assert_eq!(ImmunityMode::Waning.base_strength(5), 5);
        assert_eq!(ImmunityMode::Waning.seed_strength(5), 6);
        assert_eq!(ImmunityMode::Waning.infection_strength(5), 7);
        assert!(ImmunityMode::Waning.wanes());
    }

    #[test]
    fn waning_offsets_saturate() {
        assert_eq!(ImmunityMode::Waning.seed_strength(u32::MAX), u32::MAX);
        assert_eq!(ImmunityMode::Waning.infection_strength(u32::MAX - 1), u32::MAX);
        assert_eq!(ImmunityMode::Static.infection_strength(u32::MAX), 1);
    }
}
