//! Run configuration and input-file fallback resolution

use std::path::{Path, PathBuf};

use tracing::info;

use crate::assembly::DEFAULT_SEPARATOR;
use crate::error::{DesignerError, Result};
use crate::io::report::ReportFormat;
use crate::parts::DEFAULT_ORI_KEY;
use crate::seq::{Topology, DEFAULT_WINDOW_SIZE};

pub const DEFAULT_INPUT: &str = "Input.fa";
pub const DEFAULT_DESIGN: &str = "Design.txt";
pub const FALLBACK_INPUT: &str = "pUC19.fa";
pub const FALLBACK_DESIGN: &str = "Design_pUC19.txt";
pub const MARKER_DB_FILE: &str = "markers.json";
pub const DEFAULT_GENES_FILE: &str = "defaultgenes.json";
pub const OUTPUT_FILE: &str = "Output.fa";
pub const OUTPUT_RECORD_ID: &str = "Synthetic_Plasmid_Output";
pub const DEFAULT_ABSENT_MOTIF: &str = "EcoRI";

/// Everything one design run needs
#[derive(Debug, Clone)]
pub struct DesignConfig {
    pub input: PathBuf,
    pub design: PathBuf,
    pub markers: PathBuf,
    pub default_genes: PathBuf,
    pub output: PathBuf,
    pub record_id: String,
    pub window_size: usize,
    pub topology: Topology,
    pub separator: String,
    pub ori_key: String,
    /// Enzyme names or raw motifs expected to be absent from the output
    pub check_absent: Vec<String>,
    pub report: Option<PathBuf>,
    pub report_format: ReportFormat,
}

impl Default for DesignConfig {
    fn default() -> Self {
        DesignConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            design: PathBuf::from(DEFAULT_DESIGN),
            markers: PathBuf::from(MARKER_DB_FILE),
            default_genes: PathBuf::from(DEFAULT_GENES_FILE),
            output: PathBuf::from(OUTPUT_FILE),
            record_id: OUTPUT_RECORD_ID.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            topology: Topology::Circular,
            separator: DEFAULT_SEPARATOR.to_string(),
            ori_key: DEFAULT_ORI_KEY.to_string(),
            check_absent: vec![DEFAULT_ABSENT_MOTIF.to_string()],
            report: None,
            report_format: ReportFormat::Json,
        }
    }
}

impl DesignConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(DesignerError::Config("window size must be positive".to_string()));
        }
        if self.separator.trim().is_empty() {
            return Err(DesignerError::Config("separator must not be empty".to_string()));
        }
        if self.ori_key.trim().is_empty() {
            return Err(DesignerError::Config("ORI key must not be empty".to_string()));
        }
        if self.record_id.trim().is_empty() {
            return Err(DesignerError::Config("output record id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Swap in the bundled pUC19 inputs when the default files are absent
    /// from the working directory.
    pub fn resolve_fallbacks(&mut self) -> Result<()> {
        self.resolve_fallbacks_in(Path::new(""))
    }

    /// Like [`DesignConfig::resolve_fallbacks`], looking for default and
    /// fallback files under `base`. Only paths left at their defaults are
    /// substituted; an explicit path that does not exist fails later when read.
    pub fn resolve_fallbacks_in(&mut self, base: &Path) -> Result<()> {
        self.input = resolve_fallback(base, &self.input, DEFAULT_INPUT, FALLBACK_INPUT)?;
        self.resolve_design_fallback_in(base)
    }

    /// Design-file fallback only. Batch runs take their genomes from the
    /// command line, so `input` is left alone.
    pub fn resolve_design_fallback(&mut self) -> Result<()> {
        self.resolve_design_fallback_in(Path::new(""))
    }

    pub fn resolve_design_fallback_in(&mut self, base: &Path) -> Result<()> {
        self.design = resolve_fallback(base, &self.design, DEFAULT_DESIGN, FALLBACK_DESIGN)?;
        Ok(())
    }
}

fn resolve_fallback(base: &Path, path: &Path, default: &str, fallback: &str) -> Result<PathBuf> {
    if path != Path::new(default) {
        return Ok(path.to_path_buf());
    }
    let primary = base.join(default);
    if primary.exists() {
        return Ok(primary);
    }
    let fallback_path = base.join(fallback);
    if fallback_path.exists() {
        info!("'{}' not found. Using fallback: '{}'", default, fallback);
        Ok(fallback_path)
    } else {
        Err(DesignerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("neither '{}' nor '{}' found", default, fallback),
        )))
    }
}
