//! Configuration data structures for simulation setups.

mod parameters;
mod settings;

pub use parameters::{MultiStrainParameters, SirParameters};
pub use settings::{Model, Settings, SettingsError};
