use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;
use tracing::warn;

use crate::error::{DesignerError, Result};
use crate::seq::sequence::NucleotideSequence;

pub const DEFAULT_WINDOW_SIZE: usize = 600;

/// How coordinates past either end of the genome are handled
#[derive(Serialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Indices wrap modulo the genome length
    #[default]
    Circular,
    /// Windows are truncated at the sequence ends
    Linear,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Circular => write!(f, "circular"),
            Topology::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for Topology {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "circular" => Ok(Topology::Circular),
            "linear" => Ok(Topology::Linear),
            other => Err(DesignerError::Config(format!("unknown topology '{}'", other))),
        }
    }
}

/// A window of bases extracted around the skew minimum
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OriWindow {
    /// Skew-minimum coordinate the window is centered on
    pub center: usize,
    /// First base of the window, in [0, genome length)
    pub start: usize,
    pub topology: Topology,
    /// True when the window crosses the sequence origin
    pub wrapped: bool,
    #[serde(skip)]
    bases: Vec<u8>,
}

impl OriWindow {
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bases
    }
}

/// Extract `window_size` bases centered on `center`.
///
/// The window starts at `center - window_size / 2`. In circular mode every
/// index is taken modulo the genome length, so the result always holds exactly
/// `window_size` bases (the genome repeats if it is shorter than the window).
/// In linear mode a window larger than the genome is an error, and a window
/// overhanging either end is truncated.
pub fn extract_ori(
    seq: &NucleotideSequence,
    center: usize,
    window_size: usize,
    topology: Topology,
) -> Result<OriWindow> {
    let len = seq.len();
    if len == 0 {
        return Err(DesignerError::InvalidSequence(
            "cannot extract a window from an empty sequence".to_string(),
        ));
    }
    if window_size == 0 {
        return Err(DesignerError::Config("ORI window size must be positive".to_string()));
    }
    if center >= len {
        return Err(DesignerError::InvalidSequence(format!(
            "window center {} is outside a sequence of {} bp",
            center, len
        )));
    }

    let start = center as i64 - (window_size / 2) as i64;
    let end = start + window_size as i64;
    let bytes = seq.as_bytes();

    match topology {
        Topology::Circular => {
            let n = len as i64;
            let bases = (start..end)
                .map(|i| bytes[i.rem_euclid(n) as usize])
                .collect();
            Ok(OriWindow {
                center,
                start: start.rem_euclid(n) as usize,
                topology,
                wrapped: start < 0 || end > n,
                bases,
            })
        }
        Topology::Linear => {
            if window_size > len {
                return Err(DesignerError::InvalidSequence(format!(
                    "window of {} bp exceeds linear sequence of {} bp",
                    window_size, len
                )));
            }
            let clamped_start = start.max(0) as usize;
            let clamped_end = end.min(len as i64) as usize;
            if clamped_end - clamped_start < window_size {
                warn!(
                    "ORI window [{}, {}) truncated to [{}, {}) at linear sequence boundary",
                    start, end, clamped_start, clamped_end
                );
            }
            Ok(OriWindow {
                center,
                start: clamped_start,
                topology,
                wrapped: false,
                bases: bytes[clamped_start..clamped_end].to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_genome(len: usize) -> NucleotideSequence {
        let bases: String = (0..len).map(|i| ['A', 'C', 'G', 'T'][i % 4]).collect();
        NucleotideSequence::from_str_named("g", &bases).unwrap()
    }

    #[test]
    fn test_interior_window() {
        let genome = numbered_genome(2000);
        let win = extract_ori(&genome, 1000, 600, Topology::Circular).unwrap();
        assert_eq!(win.start, 700);
        assert_eq!(win.len(), 600);
        assert!(!win.wrapped);
        assert_eq!(win.as_bytes(), genome.subsequence(700..1300).unwrap());
    }

    #[test]
    fn test_circular_wraps_start() {
        let genome = NucleotideSequence::from_str_named("g", "AACCGGTT").unwrap();
        let win = extract_ori(&genome, 1, 4, Topology::Circular).unwrap();
        // start = -1 -> T, A, A, C
        assert_eq!(win.as_bytes(), b"TAAC");
        assert_eq!(win.start, 7);
        assert!(win.wrapped);
    }

    #[test]
    fn test_circular_wraps_end() {
        let genome = NucleotideSequence::from_str_named("g", "AACCGGTT").unwrap();
        let win = extract_ori(&genome, 7, 4, Topology::Circular).unwrap();
        assert_eq!(win.as_bytes(), b"GTTA");
        assert!(win.wrapped);
    }

    #[test]
    fn test_circular_window_longer_than_genome() {
        let genome = NucleotideSequence::from_str_named("g", "ACG").unwrap();
        let win = extract_ori(&genome, 0, 7, Topology::Circular).unwrap();
        assert_eq!(win.len(), 7);
        // start = -3 -> wraps to 0
        assert_eq!(win.as_bytes(), b"ACGACGA");
    }

    #[test]
    fn test_circular_always_exact_length() {
        let genome = numbered_genome(37);
        for center in 0..37 {
            for window in [1, 2, 5, 36, 37, 38, 100] {
                let win = extract_ori(&genome, center, window, Topology::Circular).unwrap();
                assert_eq!(win.len(), window, "center {} window {}", center, window);
            }
        }
    }

    #[test]
    fn test_linear_truncates() {
        let genome = NucleotideSequence::from_str_named("g", "AACCGGTT").unwrap();
        let win = extract_ori(&genome, 1, 4, Topology::Linear).unwrap();
        assert_eq!(win.start, 0);
        assert_eq!(win.as_bytes(), b"AAC");
        assert!(!win.wrapped);
    }

    #[test]
    fn test_linear_rejects_oversized_window() {
        let genome = NucleotideSequence::from_str_named("g", "ACGT").unwrap();
        let err = extract_ori(&genome, 2, 5, Topology::Linear).unwrap_err();
        assert!(matches!(err, DesignerError::InvalidSequence(_)));
    }

    #[test]
    fn test_zero_window_is_config_error() {
        let genome = NucleotideSequence::from_str_named("g", "ACGT").unwrap();
        let err = extract_ori(&genome, 2, 0, Topology::Circular).unwrap_err();
        assert!(matches!(err, DesignerError::Config(_)));
    }

    #[test]
    fn test_topology_from_str() {
        assert_eq!("Linear".parse::<Topology>().unwrap(), Topology::Linear);
        assert!("ring".parse::<Topology>().is_err());
    }
}
