//! Sequence module - genome storage, GC-skew analysis and ORI window extraction

pub mod sequence;
pub mod skew;
pub mod ori;

pub use ori::{extract_ori, OriWindow, Topology, DEFAULT_WINDOW_SIZE};
pub use sequence::{Composition, NucleotideSequence};
pub use skew::{analyze_skew, compute_skew_minimum, skew_curve, SkewCurve, SkewExtremum};
