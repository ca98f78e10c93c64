//! Results of single simulation runs.

use derive_more::Display;
use serde::Serialize;

use crate::core::{Variant, VariantId};

/// Reason a run stopped.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No node is infected anymore.
    #[display("extinct")]
    Extinct,
    /// The step budget was exhausted while nodes were still infected.
    #[display("step_limit")]
    StepLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SirOutcome {
    pub steps: usize,
    pub termination: Termination,
    /// Number of newly infected nodes per step, starting with the seed at step zero.
    pub profile: Vec<usize>,
    pub total_infected: usize,
}

/// Trailing incidence of a variant that exceeded the population size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WindowViolation {
    pub step: usize,
    pub variant: VariantId,
    pub window_sum: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiStrainOutcome {
    pub steps: usize,
    pub termination: Termination,
    /// All variants in order of creation, the root first.
    pub variants: Vec<Variant>,
    /// Number of newly infected nodes per step, starting with the seed at step zero.
    pub incidence: Vec<usize>,
    pub total_infected: usize,
    /// Infections by the number of loci of the infecting variant that were not covered.
    pub severity: Vec<usize>,
    /// Successful exposures of fully immune nodes that did not lead to an infection.
    pub residual_exposures: usize,
    pub violations: Vec<WindowViolation>,
}

impl MultiStrainOutcome {
    pub fn profiles(&self) -> Vec<&[usize]> {
        self.variants.iter().map(|v| v.profile.as_slice()).collect()
    }

    pub fn parents(&self) -> Vec<Option<VariantId>> {
        self.variants.iter().map(|v| v.parent).collect()
    }

    pub fn origins(&self) -> Vec<usize> {
        self.variants.iter().map(|v| v.origin).collect()
    }
}

/// Result of a run of either model.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Sir(SirOutcome),
    MultiStrain(MultiStrainOutcome),
}

impl RunOutcome {
    pub fn model(&self) -> &'static str {
        match self {
            RunOutcome::Sir(_) => "sir",
            RunOutcome::MultiStrain(_) => "multi_strain",
        }
    }

    pub fn steps(&self) -> usize {
        match self {
            RunOutcome::Sir(outcome) => outcome.steps,
            RunOutcome::MultiStrain(outcome) => outcome.steps,
        }
    }

    pub fn termination(&self) -> Termination {
        match self {
            RunOutcome::Sir(outcome) => outcome.termination,
            RunOutcome::MultiStrain(outcome) => outcome.termination,
        }
    }

    pub fn total_infected(&self) -> usize {
        match self {
            RunOutcome::Sir(outcome) => outcome.total_infected,
            RunOutcome::MultiStrain(outcome) => outcome.total_infected,
        }
    }
}
