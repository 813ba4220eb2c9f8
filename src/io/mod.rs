//! I/O module - FASTA input/output, provenance reports and skew curve export

pub mod fasta;
pub mod report;
pub mod export;
