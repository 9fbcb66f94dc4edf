//! Derivation of the output remapping table.

use super::{Remapping, UserRemapping, NPM_PREFIX};
use crate::resolver::{Dependency, DependencyMap, Origin};

/// Build the remapping table an external compiler consumes.
///
/// User remappings come first, verbatim. When the dependency map has
/// entries, a synthetic `npm/:npm/=npm/` identity row keeps the compiler's
/// own npm-prefixed paths self-consistent, followed by one row per
/// discovered `(origin, package)` edge.
#[must_use]
pub fn emit_remappings(user: &[UserRemapping], dependencies: &DependencyMap) -> Vec<Remapping> {
    let mut out: Vec<Remapping> = user
        .iter()
        .map(|r| Remapping {
            context: r.context.clone(),
            prefix: r.prefix.clone(),
            target: r.target.clone(),
        })
        .collect();

    if dependencies.is_empty() {
        return out;
    }

    out.push(Remapping {
        context: NPM_PREFIX.to_string(),
        prefix: NPM_PREFIX.to_string(),
        target: NPM_PREFIX.to_string(),
    });

    for (origin, package_name, dependency) in dependencies.iter() {
        out.push(Remapping {
            context: match origin {
                Origin::Project => String::new(),
                Origin::Package(root) => root.clone(),
            },
            prefix: format!("{package_name}/"),
            target: match dependency {
                Dependency::Project => String::new(),
                Dependency::Package(package) => package.root_source_name.clone(),
            },
        });
    }

    out
}
