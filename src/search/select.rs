//! Canonical path choice.
//!
//! When several paths tie (double cousins, pedigree collapse, a parent who
//! both bore and adopted a child) exactly one is kept, by a total order that
//! never looks at record order.

use std::cmp::Ordering;

use crate::model::{AncestorPath, Hop, LinkKind};

/// Precedence of two candidate paths; `Less` wins.
///
/// 1. fully biological before any step or adopted hop
/// 2. full before half
/// 3. fewer generations in total
/// 4. ancestor id, then person ids up the match side, then up the
///    reference side, then the families used
pub fn precedence(a: &AncestorPath, b: &AncestorPath) -> Ordering {
    b.is_fully_biological()
        .cmp(&a.is_fully_biological())
        .then_with(|| a.is_half().cmp(&b.is_half()))
        .then_with(|| a.combined_depth().cmp(&b.combined_depth()))
        .then_with(|| a.ancestor.cmp(&b.ancestor))
        .then_with(|| persons(&a.match_side).cmp(persons(&b.match_side)))
        .then_with(|| persons(&a.reference_side).cmp(persons(&b.reference_side)))
        .then_with(|| families(&a.match_side).cmp(families(&b.match_side)))
        .then_with(|| families(&a.reference_side).cmp(families(&b.reference_side)))
        .then_with(|| kinds(&a.match_side).cmp(kinds(&b.match_side)))
        .then_with(|| kinds(&a.reference_side).cmp(kinds(&b.reference_side)))
}

fn persons(side: &[Hop]) -> impl Iterator<Item = &str> {
    side.iter().map(|h| h.person.as_str())
}

fn families(side: &[Hop]) -> impl Iterator<Item = &str> {
    side.iter().map(|h| h.family.as_str())
}

fn kinds(side: &[Hop]) -> impl Iterator<Item = LinkKind> + '_ {
    side.iter().map(|h| h.kind)
}

/// The winning candidate, or `None` when there are none.
pub fn select_path<I>(candidates: I) -> Option<AncestorPath>
where
    I: IntoIterator<Item = AncestorPath>,
{
    candidates.into_iter().min_by(precedence)
}
