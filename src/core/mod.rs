//! This module contains the core datatypes of the library.

pub mod genome;
pub mod graph;
pub mod immunity;
pub mod infection;
pub mod mutation;
pub mod state;
pub mod variants;

pub use genome::Genome;
pub use graph::{ContactGraph, WeightOrder};
pub use immunity::{Immunity, ImmunityMode};
pub use infection::attempt_infection;
pub use mutation::Mutator;
pub use state::{NodeState, SirState};
pub use variants::{Variant, VariantId, VariantRegistry};
