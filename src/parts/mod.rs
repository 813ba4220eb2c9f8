//! Parts module - catalog lookup and design whitelists

pub mod catalog;
pub mod design;

pub use catalog::{load_default_genes, Part, PartCatalog, PartCategory, Resolution};
pub use design::{DesignWhitelist, DEFAULT_ORI_KEY};
