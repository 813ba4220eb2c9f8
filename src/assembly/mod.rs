//! Assembly module - ordered part layout, concatenation and motif checks

pub mod assembler;
pub mod motifs;

pub use assembler::{
    AssemblyResult, PlacedPart, PlasmidAssembler, SkippedPart, DEFAULT_SEPARATOR,
    ORI_PART_NAME,
};
pub use motifs::{check_motifs, MotifCheck};
