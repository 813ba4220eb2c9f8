//! Recognition-site lookup on assembled plasmids.
//!
//! Only exact forward-strand matching is done; cut positions and overhangs
//! are not modelled.

use serde::Serialize;

/// Common type II recognition sites, all palindromic
const KNOWN_SITES: &[(&str, &str)] = &[
    ("EcoRI", "GAATTC"),
    ("BamHI", "GGATCC"),
    ("HindIII", "AAGCTT"),
    ("XbaI", "TCTAGA"),
    ("SpeI", "ACTAGT"),
    ("PstI", "CTGCAG"),
    ("XhoI", "CTCGAG"),
    ("NcoI", "CCATGG"),
    ("NdeI", "CATATG"),
    ("KpnI", "GGTACC"),
    ("SacI", "GAGCTC"),
    ("SalI", "GTCGAC"),
    ("NotI", "GCGGCCGC"),
];

/// Presence of one motif in an assembled sequence
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MotifCheck {
    /// Enzyme name when the motif was given by name
    pub label: Option<String>,
    pub motif: String,
    pub positions: Vec<usize>,
}

impl MotifCheck {
    pub fn is_absent(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Resolve an enzyme name (case-insensitive) or pass a raw motif through uppercased.
pub fn resolve_motif(query: &str) -> (Option<String>, String) {
    let query = query.trim();
    match KNOWN_SITES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(query))
    {
        Some((name, site)) => (Some(name.to_string()), site.to_string()),
        None => (None, query.to_ascii_uppercase()),
    }
}

/// Start offsets of every (possibly overlapping) occurrence of `needle`.
pub fn find_motif(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

pub fn contains_motif(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Check each query (enzyme name or raw motif) against `sequence`.
pub fn check_motifs<S: AsRef<str>>(sequence: &[u8], queries: &[S]) -> Vec<MotifCheck> {
    queries
        .iter()
        .map(|q| {
            let (label, motif) = resolve_motif(q.as_ref());
            let positions = find_motif(sequence, motif.as_bytes());
            MotifCheck { label, motif, positions }
        })
        .collect()
}
