//! Remappings: the `context:prefix=target` surface.

mod emit;
mod parse;
mod select;

pub use emit::emit_remappings;
pub use parse::{parse_remapping_text, validate_remapping, NPM_PREFIX};
pub use select::{apply_remapping, select_best_remapping};

use crate::resolver::Package;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A `(context, prefix, target)` triple consumed by the downstream
/// compiler to rewrite imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remapping {
    pub context: String,
    pub prefix: String,
    pub target: String,
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}={}", self.prefix, self.target)
        } else {
            write!(f, "{}:{}={}", self.context, self.prefix, self.target)
        }
    }
}

/// A user-declared remapping, validated at resolver construction.
#[derive(Debug, Clone)]
pub struct UserRemapping {
    /// The remapping exactly as written, kept for error messages.
    pub raw: String,
    pub context: String,
    pub prefix: String,
    pub target: String,
    /// Populated iff `target` begins with `npm/` and references an
    /// installed package.
    pub target_package: Option<Arc<Package>>,
}
