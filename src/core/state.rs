//! Per node compartment tags of both epidemic engines.

use super::variants::VariantId;

/// State of a node in the multi strain model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    #[default]
    Susceptible,
    Infected(VariantId),
    /// Infection chosen during the current step, live once the step is committed.
    Pending(VariantId),
}

impl NodeState {
    pub fn is_susceptible(&self) -> bool {
        matches!(self, NodeState::Susceptible)
    }

    /// Variant of a live infection.
    pub fn infecting_variant(&self) -> Option<VariantId> {
        match self {
            NodeState::Infected(variant) => Some(*variant),
            _ => None,
        }
    }
}

/// State of a node in the single strain model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SirState {
    #[default]
    Susceptible,
    Infected,
    Removed,
    /// Infection chosen during the current step, live once the step is committed.
    Pending,
}
