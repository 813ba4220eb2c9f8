//! Design file parsing.
//!
//! A design file lists the parts to include, one per line. The part name is
//! the first comma-separated field; an optional second field names the
//! category (`marker`, `gene`, `mcs`, `site`, `ori`). Blank lines and lines
//! starting with `#` are ignored. Without an explicit category, names ending
//! in `_site` go to the MCS and everything else to the marker/gene block.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{DesignerError, Result};
use crate::parts::catalog::PartCategory;

/// Whitelist entry that stands in for the skew-derived origin
pub const DEFAULT_ORI_KEY: &str = "ori_pMB1";

/// Requested part names, split by category and kept in file order within
/// each category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignWhitelist {
    ori_requested: bool,
    markers: Vec<String>,
    mcs: Vec<String>,
}

impl DesignWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the skew-derived origin as requested.
    pub fn request_ori(&mut self) {
        self.ori_requested = true;
    }

    /// Append a name to the block for `category`. Only the ORI key stands
    /// for the origin (see [`DesignWhitelist::request_ori`]); any other name
    /// is kept so it is either resolved or reported as skipped.
    pub fn push(&mut self, name: &str, category: PartCategory) {
        match category {
            PartCategory::Ori => {
                let inferred = PartCategory::infer(name);
                warn!(
                    "'{}' is marked as an ORI but is not the ORI key; the origin comes from the skew minimum, treating it as {}",
                    name, inferred
                );
                self.push(name, inferred);
            }
            PartCategory::Marker => self.markers.push(name.to_string()),
            PartCategory::Mcs => self.mcs.push(name.to_string()),
            PartCategory::DefaultGene => {
                warn!("'{}' is marked as a default gene; default genes are always included, treating it as a marker", name);
                self.markers.push(name.to_string());
            }
        }
    }

    /// Build from bare names using category inference.
    pub fn from_names<S: AsRef<str>>(names: &[S], ori_key: &str) -> Self {
        let mut whitelist = Self::new();
        for name in names {
            let name = name.as_ref();
            if name == ori_key {
                whitelist.request_ori();
            } else {
                whitelist.push(name, PartCategory::infer(name));
            }
        }
        whitelist
    }

    pub fn parse(text: &str, ori_key: &str) -> Self {
        let mut whitelist = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(',').map(str::trim);
            let name = match fields.next() {
                Some(n) if !n.is_empty() => n,
                _ => {
                    warn!("Design line {} has no part name, ignoring", lineno + 1);
                    continue;
                }
            };

            let explicit = fields.next().filter(|t| !t.is_empty()).and_then(|token| {
                let parsed = PartCategory::from_token(token);
                if parsed.is_none() {
                    debug!("Design line {}: unrecognised category '{}', inferring", lineno + 1, token);
                }
                parsed
            });

            if name == ori_key {
                debug!("Design entry '{}' -> origin", name);
                whitelist.request_ori();
                continue;
            }
            let category = explicit.unwrap_or_else(|| PartCategory::infer(name));
            debug!("Design entry '{}' -> {}", name, category);
            whitelist.push(name, category);
        }
        whitelist
    }

    pub fn from_path(path: &Path, ori_key: &str) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DesignerError::design_load(path, e))?;
        let whitelist = Self::parse(&text, ori_key);
        if whitelist.is_empty() {
            warn!("Design file '{}' requests no parts", path.display());
        }
        Ok(whitelist)
    }

    /// Whether the design listed the ORI placeholder. The origin is placed
    /// first either way.
    pub fn ori_requested(&self) -> bool {
        self.ori_requested
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn mcs(&self) -> &[String] {
        &self.mcs
    }

    /// Number of catalog names requested (ORI placeholder excluded)
    pub fn len(&self) -> usize {
        self.markers.len() + self.mcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && !self.ori_requested
    }
}
