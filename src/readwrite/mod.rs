//! IO for contact graphs, graph reports and run results.

mod graph;
mod outcome;
mod report;

pub use graph::GraphIO;
pub use outcome::{IncidenceRecord, OutcomeWriter, SeverityRecord, SummaryRecord, VariantRecord};
pub use report::write_report;
