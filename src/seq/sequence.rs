use std::ops::Range;

use bio::alphabets::dna;
use serde::Serialize;

use crate::error::{DesignerError, Result};

/// An immutable, validated nucleotide sequence (genome or part).
///
/// Symbols are stored uppercased with whitespace removed. Any IUPAC DNA
/// symbol is accepted, so ambiguity codes such as `N` survive loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleotideSequence {
    name: Option<String>,
    bases: Vec<u8>,
}

/// Per-base counts of a sequence
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    /// Ambiguity codes (N, R, Y, ...)
    pub other: usize,
}

impl Composition {
    pub fn total(&self) -> usize {
        self.a + self.c + self.g + self.t + self.other
    }

    /// Number of unambiguous bases
    pub fn unambiguous(&self) -> usize {
        self.a + self.c + self.g + self.t
    }
}

impl NucleotideSequence {
    /// Build a sequence from raw text, normalising case and dropping whitespace.
    pub fn new(name: Option<String>, raw: &[u8]) -> Result<Self> {
        let bases = normalize_bases(raw);
        if bases.is_empty() {
            return Err(DesignerError::InvalidSequence(format!(
                "sequence {} is empty",
                display_name(name.as_deref())
            )));
        }
        validate_bases(&bases).map_err(|(pos, sym)| {
            DesignerError::InvalidSequence(format!(
                "sequence {} has invalid symbol '{}' at position {}",
                display_name(name.as_deref()),
                sym as char,
                pos
            ))
        })?;
        Ok(NucleotideSequence { name, bases })
    }

    pub fn from_str_named(name: &str, raw: &str) -> Result<Self> {
        Self::new(Some(name.to_string()), raw.as_bytes())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always false for a constructed sequence; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII IUPAC symbols pass validation
        std::str::from_utf8(&self.bases).unwrap_or_default()
    }

    pub fn base_at(&self, index: usize) -> Option<u8> {
        self.bases.get(index).copied()
    }

    /// Borrow the bases in `range`, or `None` if it runs past the end.
    pub fn subsequence(&self, range: Range<usize>) -> Option<&[u8]> {
        self.bases.get(range)
    }

    pub fn composition(&self) -> Composition {
        let mut comp = Composition::default();
        for &b in &self.bases {
            match b {
                b'A' => comp.a += 1,
                b'C' => comp.c += 1,
                b'G' => comp.g += 1,
                b'T' => comp.t += 1,
                _ => comp.other += 1,
            }
        }
        comp
    }

    /// Fraction of G+C over unambiguous bases
    pub fn gc_content(&self) -> f64 {
        let comp = self.composition();
        let total = comp.unambiguous();
        if total > 0 {
            (comp.g + comp.c) as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Uppercase and strip ASCII whitespace (line breaks included).
pub fn normalize_bases(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| b.to_ascii_uppercase())
        .collect()
}

/// Returns the first symbol outside the IUPAC DNA alphabet, if any.
pub fn validate_bases(bases: &[u8]) -> std::result::Result<(), (usize, u8)> {
    let alphabet = dna::iupac_alphabet();
    match bases.iter().position(|&b| !alphabet.is_word([b])) {
        Some(pos) => Err((pos, bases[pos])),
        None => Ok(()),
    }
}

fn display_name(name: Option<&str>) -> String {
    match name {
        Some(n) => format!("'{}'", n),
        None => "<unnamed>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let seq = NucleotideSequence::new(Some("g".into()), b"acgt\nACGT \r\n nn").unwrap();
        assert_eq!(seq.as_str(), "ACGTACGTNN");
        assert_eq!(seq.len(), 10);
        assert_eq!(seq.name(), Some("g"));
    }

    #[test]
    fn test_rejects_empty() {
        let err = NucleotideSequence::new(None, b" \n\t").unwrap_err();
        assert!(matches!(err, DesignerError::InvalidSequence(_)));
    }

    #[test]
    fn test_rejects_invalid_symbol() {
        let err = NucleotideSequence::new(Some("bad".into()), b"ACGTXACGT").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'X'"));
        assert!(msg.contains("position 4"));
    }

    #[test]
    fn test_composition_and_gc() {
        let seq = NucleotideSequence::from_str_named("c", "AACCGGTTNN").unwrap();
        let comp = seq.composition();
        assert_eq!(comp, Composition { a: 2, c: 2, g: 2, t: 2, other: 2 });
        assert_eq!(comp.total(), 10);
        // N does not count towards GC
        assert!((seq.gc_content() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_subsequence_bounds() {
        let seq = NucleotideSequence::from_str_named("s", "ACGTACGT").unwrap();
        assert_eq!(seq.subsequence(2..5), Some(&b"GTA"[..]));
        assert_eq!(seq.subsequence(6..9), None);
        assert_eq!(seq.base_at(7), Some(b'T'));
        assert_eq!(seq.base_at(8), None);
    }
}
