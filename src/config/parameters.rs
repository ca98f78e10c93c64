use serde::{Deserialize, Serialize};

use crate::core::ImmunityMode;
use crate::errors::{Result, SimulationError};

/// Parameters of the single strain model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SirParameters {
    /// Probability that a single contact with an infected neighbour transmits.
    pub transmissibility: f64,
}

/// Parameters of the multi strain model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MultiStrainParameters {
    /// Transmissibility of the root variant.
    pub transmissibility: f64,

    /// Couple transmission to the fraction of uncovered loci and keep transmissibility fixed
    /// across the lineage.
    pub coupled: bool,

    /// Probability that a successful transmission creates a new variant.
    pub mutation_probability: f64,

    /// Maximum number of variants, including the root.
    pub max_variants: usize,

    /// Protection that an infection leaves behind.
    #[serde(default)]
    pub immunity_mode: ImmunityMode,

    /// Base strength of waning immunity.
    #[serde(default)]
    pub immunity_strength: u32,

    /// Number of loci of every genome.
    #[serde(default = "default_genome_length")]
    pub genome_length: usize,

    /// Number of ones in the root genome.
    pub initial_ones: usize,

    /// Lower bound of flipped loci per mutation.
    pub min_edits: usize,

    /// Upper bound of flipped loci per mutation.
    pub max_edits: usize,

    /// Maximum change of transmissibility per mutation in uncoupled runs.
    pub transmissibility_drift: f64,
}

fn default_genome_length() -> usize {
    100
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0. ..=1.).contains(&value) {
        return Err(SimulationError::ConfigurationError(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl SirParameters {
    pub fn validate(&self) -> Result<()> {
        check_probability("transmissibility", self.transmissibility)
    }
}

impl MultiStrainParameters {
    pub fn validate(&self) -> Result<()> {
        check_probability("transmissibility", self.transmissibility)?;
        check_probability("mutation_probability", self.mutation_probability)?;

        if self.max_variants == 0 {
            return Err(SimulationError::ConfigurationError(
                "max_variants must be positive".to_string(),
            ));
        }
        if self.initial_ones > self.genome_length {
            return Err(SimulationError::ConfigurationError(format!(
                "initial_ones ({}) exceeds genome_length ({})",
                self.initial_ones, self.genome_length
            )));
        }
        if self.min_edits > self.max_edits {
            return Err(SimulationError::ConfigurationError(format!(
                "min_edits ({}) exceeds max_edits ({})",
                self.min_edits, self.max_edits
            )));
        }
        if self.max_edits > self.genome_length {
            return Err(SimulationError::ConfigurationError(format!(
                "max_edits ({}) exceeds genome_length ({})",
                self.max_edits, self.genome_length
            )));
        }
        if !self.transmissibility_drift.is_finite() || self.transmissibility_drift < 0. {
            return Err(SimulationError::ConfigurationError(format!(
                "transmissibility_drift must be non-negative, got {}",
                self.transmissibility_drift
            )));
        }
        Ok(())
    }
}

impl Default for MultiStrainParameters {
    fn default() -> Self {
        Self {
            transmissibility: 0.5,
            coupled: true,
            mutation_probability: 0.01,
            max_variants: 1000,
            immunity_mode: ImmunityMode::Static,
            immunity_strength: 0,
            genome_length: default_genome_length(),
            initial_ones: 10,
            min_edits: 1,
            max_edits: 3,
            transmissibility_drift: 0.1,
        }
    }
}
