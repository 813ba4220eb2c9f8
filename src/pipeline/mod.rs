//! Pipeline module - single-genome design and parallel batch runs

pub mod design;
pub mod batch;

pub use batch::{run_batch, BatchSummary};
pub use design::{design_plasmid, run_design, DesignInputs, DesignOutcome};
