//! Error types for the plasmid designer

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the design pipeline.
///
/// Parts missing from the catalog are not errors; they are reported as
/// [`crate::assembly::SkippedPart`] entries on the assembly result.
#[derive(Error, Debug)]
pub enum DesignerError {
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Failed to load part catalog {}: {reason}", path.display())]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("Failed to load design file {}: {reason}", path.display())]
    DesignLoad { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DesignerError {
    pub fn catalog_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DesignerError::CatalogLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn design_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DesignerError::DesignLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignerError>;
