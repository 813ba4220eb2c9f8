//! Plasmid assembly.
//!
//! Parts are laid out in a fixed category order: ORI, markers/genes, MCS
//! sites, then every default gene. Within the marker and MCS blocks the
//! whitelist order is kept. Adjacent parts are joined by exactly one copy of
//! the separator (a BioBrick scar by default).

use serde::Serialize;
use tracing::{info, warn};

use crate::assembly::motifs::contains_motif;
use crate::error::{DesignerError, Result};
use crate::parts::{DesignWhitelist, Part, PartCatalog, PartCategory};
use crate::seq::sequence::validate_bases;
use crate::seq::OriWindow;

/// Standard BioBrick scar
pub const DEFAULT_SEPARATOR: &str = "TACTAGAG";

/// Name under which the extracted origin appears in provenance records
pub const ORI_PART_NAME: &str = "ORI";

/// One block of the layout
#[derive(Debug, Clone)]
struct LayoutPart {
    name: String,
    category: PartCategory,
    bases: Vec<u8>,
}

impl LayoutPart {
    fn from_part(part: &Part, category: PartCategory) -> Self {
        LayoutPart {
            name: part.name.clone(),
            category,
            bases: part.sequence.as_bytes().to_vec(),
        }
    }
}

/// Parts grouped by category. Iteration order is fixed by the struct, not by
/// the order parts were added.
#[derive(Debug, Clone)]
pub(crate) struct AssemblyLayout {
    ori: LayoutPart,
    markers: Vec<LayoutPart>,
    mcs: Vec<LayoutPart>,
    default_genes: Vec<LayoutPart>,
}

impl AssemblyLayout {
    fn new(ori: &OriWindow) -> Self {
        AssemblyLayout {
            ori: LayoutPart {
                name: ORI_PART_NAME.to_string(),
                category: PartCategory::Ori,
                bases: ori.as_bytes().to_vec(),
            },
            markers: Vec::new(),
            mcs: Vec::new(),
            default_genes: Vec::new(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &LayoutPart> {
        std::iter::once(&self.ori)
            .chain(self.markers.iter())
            .chain(self.mcs.iter())
            .chain(self.default_genes.iter())
    }

    fn len(&self) -> usize {
        1 + self.markers.len() + self.mcs.len() + self.default_genes.len()
    }
}

/// A part placed in the output, with its half-open span
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlacedPart {
    pub name: String,
    pub category: PartCategory,
    pub start: usize,
    pub end: usize,
}

/// A requested part that was not found in the catalog
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedPart {
    pub name: String,
    pub category: PartCategory,
}

/// Assembled plasmid plus its provenance
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResult {
    #[serde(skip)]
    sequence: String,
    length: usize,
    separator: String,
    included: Vec<PlacedPart>,
    skipped: Vec<SkippedPart>,
    separator_conflicts: Vec<String>,
}

impl AssemblyResult {
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn included(&self) -> &[PlacedPart] {
        &self.included
    }

    pub fn included_names(&self) -> Vec<&str> {
        self.included.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn skipped(&self) -> &[SkippedPart] {
        &self.skipped
    }

    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|p| p.name.as_str()).collect()
    }

    /// Parts whose own bases contain the separator literal
    pub fn separator_conflicts(&self) -> &[String] {
        &self.separator_conflicts
    }
}

/// Joins ORI, whitelisted parts and default genes with a fixed separator.
#[derive(Debug, Clone)]
pub struct PlasmidAssembler {
    separator: String,
}

impl Default for PlasmidAssembler {
    fn default() -> Self {
        PlasmidAssembler {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl PlasmidAssembler {
    /// The separator must be a non-empty IUPAC nucleotide string.
    pub fn new(separator: &str) -> Result<Self> {
        let separator = separator.trim().to_ascii_uppercase();
        if separator.is_empty() {
            return Err(DesignerError::Config("separator must not be empty".to_string()));
        }
        validate_bases(separator.as_bytes()).map_err(|(pos, sym)| {
            DesignerError::Config(format!(
                "separator '{}' has invalid symbol '{}' at position {}",
                separator, sym as char, pos
            ))
        })?;
        Ok(PlasmidAssembler { separator })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    // Names absent from the catalog are logged and recorded as skipped.
    fn layout(
        &self,
        ori: &OriWindow,
        whitelist: &DesignWhitelist,
        catalog: &PartCatalog,
        default_genes: &[Part],
        skipped: &mut Vec<SkippedPart>,
    ) -> AssemblyLayout {
        let mut layout = AssemblyLayout::new(ori);
        info!("ORI ({} bp) -> position 1", ori.len());

        for (names, category, block) in [
            (whitelist.markers(), PartCategory::Marker, &mut layout.markers),
            (whitelist.mcs(), PartCategory::Mcs, &mut layout.mcs),
        ] {
            let resolution = catalog.resolve(names);
            for part in &resolution.resolved {
                info!("{} ({} bp) -> {} block", part.name, part.len(), category);
                block.push(LayoutPart::from_part(part, category));
            }
            for name in resolution.missing {
                warn!("'{}' missing from part catalog, skipping", name);
                skipped.push(SkippedPart { name, category });
            }
        }

        for gene in default_genes {
            info!("{} ({} bp) -> default genes", gene.name, gene.len());
            layout
                .default_genes
                .push(LayoutPart::from_part(gene, PartCategory::DefaultGene));
        }
        layout
    }

    /// Resolve the whitelist against `catalog` and join every part.
    ///
    /// Never fails: unknown names end up in [`AssemblyResult::skipped`].
    pub fn assemble(
        &self,
        ori: &OriWindow,
        whitelist: &DesignWhitelist,
        catalog: &PartCatalog,
        default_genes: &[Part],
    ) -> AssemblyResult {
        let mut skipped = Vec::new();
        let layout = self.layout(ori, whitelist, catalog, default_genes, &mut skipped);
        self.concatenate(&layout, skipped)
    }

    fn concatenate(&self, layout: &AssemblyLayout, skipped: Vec<SkippedPart>) -> AssemblyResult {
        let sep = self.separator.as_bytes();
        let total: usize = layout.iter().map(|p| p.bases.len()).sum::<usize>()
            + sep.len() * (layout.len() - 1);

        let mut bases = Vec::with_capacity(total);
        let mut included = Vec::with_capacity(layout.len());
        let mut separator_conflicts = Vec::new();

        for (i, part) in layout.iter().enumerate() {
            if i > 0 {
                bases.extend_from_slice(sep);
            }
            if contains_motif(&part.bases, sep) {
                warn!("Part '{}' contains the separator {}", part.name, self.separator);
                separator_conflicts.push(part.name.clone());
            }
            let start = bases.len();
            bases.extend_from_slice(&part.bases);
            included.push(PlacedPart {
                name: part.name.clone(),
                category: part.category,
                start,
                end: bases.len(),
            });
        }

        // Bases come from validated ASCII sequences
        let sequence = String::from_utf8_lossy(&bases).into_owned();
        AssemblyResult {
            length: sequence.len(),
            sequence,
            separator: self.separator.clone(),
            included,
            skipped,
            separator_conflicts,
        }
    }
}
