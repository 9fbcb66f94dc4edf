//! Import extraction from Solidity source.

mod scan;

pub use scan::{scan_imports, ImportSpec};
