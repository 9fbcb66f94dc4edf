//! Best-remapping selection.

use super::UserRemapping;

/// Choose the best remapping for `(context_source_name, direct_import)`.
///
/// A candidate matches when its context is a prefix of the importing file's
/// source name and its prefix is a prefix of the direct import. The longest
/// context wins, then the longest prefix; among equals, the last
/// declaration wins.
#[must_use]
pub fn select_best_remapping<'a>(
    remappings: &'a [UserRemapping],
    context_source_name: &str,
    direct_import: &str,
) -> Option<&'a UserRemapping> {
    let mut best: Option<&UserRemapping> = None;

    for remapping in remappings {
        if !context_source_name.starts_with(&remapping.context)
            || !direct_import.starts_with(&remapping.prefix)
        {
            continue;
        }

        let wins = match best {
            None => true,
            Some(b) => {
                (remapping.context.len(), remapping.prefix.len())
                    >= (b.context.len(), b.prefix.len())
            }
        };
        if wins {
            best = Some(remapping);
        }
    }

    best
}

/// Substitute the remapping's prefix with its target in `direct_import`.
#[must_use]
pub fn apply_remapping(remapping: &UserRemapping, direct_import: &str) -> String {
    format!(
        "{}{}",
        remapping.target,
        &direct_import[remapping.prefix.len()..]
    )
}
