//! GC-skew origin detection and whitelist-driven synthetic plasmid assembly.
//!
//! The pipeline reads a genome, locates the origin of replication at the
//! global minimum of the cumulative GC skew, cuts a fixed window around it and
//! joins that window with the requested catalog parts and the default genes.

pub mod assembly;
pub mod config;
pub mod error;
pub mod io;
pub mod parts;
pub mod pipeline;
pub mod seq;
pub mod stats;

pub use error::{DesignerError, Result};
