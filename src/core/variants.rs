//! Registry of all variants created during a run
//!
//! Variants are identified by their sequential index. The root variant is registered first and
//! has no parent, every later variant points to a previously registered parent, such that the
//! lineage forms a forest. Apart from the incidence profile, variants do not change after
//! registration.

use crate::errors::{Result, SimulationError};

use super::genome::Genome;

pub type VariantId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    pub genome: Genome,
    pub transmissibility: f64,
    pub parent: Option<VariantId>,
    pub origin: usize,
    /// Number of new infections for every step in which the variant infected anyone.
    pub profile: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct VariantRegistry {
    variants: Vec<Variant>,
    max_variants: usize,
}

impl VariantRegistry {
    /// Construct a registry holding only the root variant, created at step zero.
    pub fn new(root: Genome, transmissibility: f64, max_variants: usize) -> Result<Self> {
        if max_variants == 0 {
            return Err(SimulationError::ConfigurationError(
                "At least one variant must be allowed".to_string(),
            ));
        }
        let mut variants = Vec::with_capacity(max_variants.min(1024));
        variants.push(Variant {
            genome: root,
            transmissibility,
            parent: None,
            origin: 0,
            profile: Vec::new(),
        });
        Ok(Self {
            variants,
            max_variants,
        })
    }

    /// Register a child of `parent` that emerged at step `origin`.
    pub fn spawn(
        &mut self,
        parent: VariantId,
        genome: Genome,
        transmissibility: f64,
        origin: usize,
    ) -> Result<VariantId> {
        if self.variants.len() >= self.max_variants {
            return Err(SimulationError::ConfigurationError(format!(
                "Variant count exceeds the maximum of {}",
                self.max_variants
            )));
        }
        if parent >= self.variants.len() {
            return Err(SimulationError::ConsistencyViolation(format!(
                "Parent variant {parent} is not registered"
            )));
        }
        let id = self.variants.len();
        self.variants.push(Variant {
            genome,
            transmissibility,
            parent: Some(parent),
            origin,
            profile: Vec::new(),
        });
        log::trace!("Variant {id} emerged from {parent} at step {origin}");
        Ok(id)
    }

    /// Append the number of new infections of the current step to the variant's profile.
    pub fn record_infection(&mut self, id: VariantId, count: usize) {
        self.variants[id].profile.push(count);
    }

    /// Sum of the trailing `window` entries of the variant's profile.
    pub fn window_sum(&self, id: VariantId, window: usize) -> usize {
        let profile = &self.variants[id].profile;
        let start = profile.len().saturating_sub(window);
        profile[start..].iter().sum()
    }

    pub fn get(&self, id: VariantId) -> &Variant {
        &self.variants[id]
    }

    pub fn genome(&self, id: VariantId) -> &Genome {
        &self.variants[id].genome
    }

    pub fn transmissibility(&self, id: VariantId) -> f64 {
        self.variants[id].transmissibility
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    pub fn into_variants(self) -> Vec<Variant> {
        self.variants
    }
}
