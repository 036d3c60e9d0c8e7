//! Best-effort provider ordering
//!
//! Turns an unordered group of same-type providers into one total order that
//! honors as many `before`/`after` hints as possible. The algorithm is a
//! selection sort over pairwise hints rather than a queue-based topological
//! sort: it terminates and produces a defined output even when the hint graph
//! is cyclic or contradictory, and it never reports an ordering error.
//!
//! Quadratic in group size. Groups are bounded by the number of providers
//! registered for one resource type, so this trades asymptotics for
//! determinism and cycle tolerance.

use crate::provider::ResourceProvider;
use std::sync::Arc;

/// Order a group of providers sharing one resource type
///
/// Every input element appears in the output exactly once. The output is a
/// pure function of the input *set*: the tie-break pre-sort (name ascending,
/// then `after` count, then `before` count) erases the caller's enumeration
/// order before selection runs.
pub(crate) fn order_providers(
    mut candidates: Vec<Arc<dyn ResourceProvider>>,
) -> Vec<Arc<dyn ResourceProvider>> {
    // Tie-break pre-sort. Also seeds which candidate is considered first in
    // each selection pass.
    candidates.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then_with(|| a.after().len().cmp(&b.after().len()))
            .then_with(|| a.before().len().cmp(&b.before().len()))
    });

    let mut ordered = Vec::with_capacity(candidates.len());
    while !candidates.is_empty() {
        let mut best = 0;
        for idx in 1..candidates.len() {
            // The incumbent keeps its slot on ties and on contradictory
            // hints; a challenger wins only with an uncontested hint.
            if !precedes(&candidates[best], &candidates[idx])
                && precedes(&candidates[idx], &candidates[best])
            {
                best = idx;
            }
        }
        ordered.push(candidates.remove(best));
    }
    ordered
}

/// True if a declared hint places `a` before `b`
fn precedes(a: &Arc<dyn ResourceProvider>, b: &Arc<dyn ResourceProvider>) -> bool {
    contains(a.before(), b.name()) || contains(b.after(), a.name())
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}
