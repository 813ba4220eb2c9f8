use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DesignerError, Result};
use crate::seq::NucleotideSequence;

/// Where a part goes in the assembled plasmid
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    Ori,
    Marker,
    Mcs,
    DefaultGene,
}

impl PartCategory {
    /// Category implied by a part name: restriction sites end in `_site`.
    pub fn infer(name: &str) -> Self {
        if name.ends_with("_site") {
            PartCategory::Mcs
        } else {
            PartCategory::Marker
        }
    }

    /// Parse an explicit category token from a design or catalog file.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "ori" | "origin" => Some(PartCategory::Ori),
            "marker" | "gene" => Some(PartCategory::Marker),
            "mcs" | "site" | "restriction_site" => Some(PartCategory::Mcs),
            "default" | "default_gene" => Some(PartCategory::DefaultGene),
            _ => None,
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PartCategory::Ori => "ori",
            PartCategory::Marker => "marker",
            PartCategory::Mcs => "mcs",
            PartCategory::DefaultGene => "default_gene",
        };
        write!(f, "{}", label)
    }
}

/// A named genetic part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub category: PartCategory,
    pub sequence: NucleotideSequence,
    pub description: Option<String>,
}

impl Part {
    pub fn new(name: &str, category: PartCategory, bases: &str) -> Result<Self> {
        Ok(Part {
            name: name.to_string(),
            category,
            sequence: NucleotideSequence::from_str_named(name, bases)?,
            description: None,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A catalog entry is either a bare sequence or an object with metadata
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum PartEntry {
    Sequence(String),
    Detailed {
        sequence: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

/// Outcome of a batch lookup: every requested name lands in exactly one list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: Vec<Part>,
    pub missing: Vec<String>,
}

/// Name-indexed part database, iterable in file order
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    source: Option<PathBuf>,
    parts: Vec<Part>,
    index: AHashMap<String, usize>,
}

impl PartCatalog {
    /// Build a catalog from parts; a repeated name replaces the earlier entry in place.
    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let mut catalog = PartCatalog::default();
        for part in parts {
            catalog.insert(part);
        }
        catalog
    }

    fn insert(&mut self, part: Part) {
        match self.index.get(&part.name) {
            Some(&i) => self.parts[i] = part,
            None => {
                self.index.insert(part.name.clone(), self.parts.len());
                self.parts.push(part);
            }
        }
    }

    /// Load a JSON object of `name -> sequence` (or `name -> {sequence, category, description}`).
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DesignerError::catalog_load(path, e))?;
        let mut catalog = Self::from_json_str(&text, path)?;
        catalog.source = Some(path.to_path_buf());
        info!("Loaded {} parts from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse catalog JSON; `origin` only labels errors.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| DesignerError::catalog_load(origin, e))?;

        let mut catalog = PartCatalog::default();
        for (name, value) in map {
            let entry: PartEntry = serde_json::from_value(value).map_err(|e| {
                DesignerError::catalog_load(origin, format!("part '{}': {}", name, e))
            })?;
            let (bases, category, description) = match entry {
                PartEntry::Sequence(bases) => (bases, None, None),
                PartEntry::Detailed { sequence, category, description } => {
                    (sequence, category, description)
                }
            };
            let category = match category.as_deref() {
                Some(token) => PartCategory::from_token(token).unwrap_or_else(|| {
                    warn!("Part '{}' has unknown category '{}', inferring from name", name, token);
                    PartCategory::infer(&name)
                }),
                None => PartCategory::infer(&name),
            };
            let sequence = NucleotideSequence::new(Some(name.clone()), bases.as_bytes())
                .map_err(|e| DesignerError::catalog_load(origin, e))?;
            debug!("Catalog part '{}' ({}, {} bp)", name, category, sequence.len());
            catalog.insert(Part { name, category, sequence, description });
        }
        Ok(catalog)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.index.get(name).map(|&i| &self.parts[i])
    }

    /// Parts in the order they were loaded
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Look up every name in order. Unknown names are collected in `missing`
    /// instead of failing the batch.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Resolution {
        let mut resolution = Resolution::default();
        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(part) => resolution.resolved.push(part.clone()),
                None => resolution.missing.push(name.to_string()),
            }
        }
        resolution
    }
}

/// Load the unconditional default-gene set in file order.
///
/// A missing file yields an empty set with a warning; an unreadable or
/// malformed file is a [`DesignerError::CatalogLoad`].
pub fn load_default_genes(path: &Path) -> Result<Vec<Part>> {
    if !path.exists() {
        warn!("Default genes database '{}' not found, continuing without default genes", path.display());
        return Ok(Vec::new());
    }
    let catalog = PartCatalog::from_json_path(path)?;
    Ok(catalog
        .parts
        .into_iter()
        .map(|part| Part { category: PartCategory::DefaultGene, ..part })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog() -> PartCatalog {
        PartCatalog::from_parts(vec![
            Part::new("MarkerA", PartCategory::Marker, "ATGAAA").unwrap(),
            Part::new("EcoRI_site", PartCategory::Mcs, "GAATTC").unwrap(),
            Part::new("GeneY", PartCategory::Marker, "ATGCCC").unwrap(),
        ])
    }

    #[test]
    fn test_resolve_partitions_names() {
        let res = catalog().resolve(&["MarkerA", "GeneX", "EcoRI_site", "markera"]);
        let names: Vec<_> = res.resolved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["MarkerA", "EcoRI_site"]);
        assert_eq!(res.missing, vec!["GeneX", "markera"]);
    }

    #[test]
    fn test_resolve_preserves_order_and_duplicates() {
        let res = catalog().resolve(&["GeneY", "MarkerA", "GeneY"]);
        let names: Vec<_> = res.resolved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["GeneY", "MarkerA", "GeneY"]);
        assert!(res.missing.is_empty());
    }

    #[test]
    fn test_resolve_empty_request() {
        let res = catalog().resolve::<&str>(&[]);
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn test_json_keeps_file_order() {
        let json = r#"{"zeta": "ATG", "alpha": "GGG", "mid_site": "GAATTC"}"#;
        let cat = PartCatalog::from_json_str(json, Path::new("mem.json")).unwrap();
        let names: Vec<_> = cat.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid_site"]);
        assert_eq!(cat.get("mid_site").unwrap().category, PartCategory::Mcs);
        assert_eq!(cat.get("zeta").unwrap().category, PartCategory::Marker);
    }

    #[test]
    fn test_json_detailed_entries() {
        let json = r#"{
            "lacZ_alpha": {"sequence": "atg acc\natg", "category": "mcs", "description": "blue/white"},
            "AmpR": "ATGAGT"
        }"#;
        let cat = PartCatalog::from_json_str(json, Path::new("mem.json")).unwrap();
        let lacz = cat.get("lacZ_alpha").unwrap();
        assert_eq!(lacz.category, PartCategory::Mcs);
        assert_eq!(lacz.sequence.as_str(), "ATGACCATG");
        assert_eq!(lacz.description.as_deref(), Some("blue/white"));
    }

    #[test]
    fn test_json_invalid_sequence_is_load_error() {
        let json = r#"{"bad": "ATGZZZ"}"#;
        let err = PartCatalog::from_json_str(json, Path::new("mem.json")).unwrap_err();
        match err {
            DesignerError::CatalogLoad { reason, .. } => assert!(reason.contains("bad")),
            other => panic!("Expected CatalogLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_json_malformed_is_load_error() {
        let err = PartCatalog::from_json_str("[1, 2", Path::new("mem.json")).unwrap_err();
        assert!(matches!(err, DesignerError::CatalogLoad { .. }));
    }

    #[test]
    fn test_missing_catalog_file_is_load_error() {
        let err = PartCatalog::from_json_path(Path::new("/nonexistent/markers.json")).unwrap_err();
        assert!(matches!(err, DesignerError::CatalogLoad { .. }));
    }

    #[test]
    fn test_default_genes_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"repA": "ATGCGT", "rop": "ATGACC"}}"#).unwrap();

        let genes = load_default_genes(file.path()).unwrap();
        let names: Vec<_> = genes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["repA", "rop"]);
        assert!(genes.iter().all(|p| p.category == PartCategory::DefaultGene));
    }

    #[test]
    fn test_default_genes_missing_file_is_empty() {
        let genes = load_default_genes(Path::new("/nonexistent/defaultgenes.json")).unwrap();
        assert!(genes.is_empty());
    }
}
