//! Statistics and metric trait implementations

pub mod outcome;

pub use outcome::{IncidenceSummary, LineageStatistics, format_profile};
