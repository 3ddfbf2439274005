//! Two hop sequences meeting at a common ancestor.

use serde::{Deserialize, Serialize};
use super::{FamilyId, LinkKind, PersonId};

/// One generation step upward: `person` is a child in `family`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hop {
    pub person: PersonId,
    pub family: FamilyId,
    pub kind: LinkKind,
}

/// A match person and the reference person joined through `ancestor`.
///
/// Each side runs from its starting person up to a family in which the
/// ancestor is a parent. An empty side means that person *is* the ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorPath {
    pub ancestor: PersonId,
    pub match_side: Vec<Hop>,
    pub reference_side: Vec<Hop>,
}

impl AncestorPath {
    pub fn depth_match(&self) -> usize {
        self.match_side.len()
    }

    pub fn depth_reference(&self) -> usize {
        self.reference_side.len()
    }

    pub fn combined_depth(&self) -> usize {
        self.depth_match() + self.depth_reference()
    }

    /// The family through which the match side reaches the ancestor.
    pub fn match_family(&self) -> Option<&FamilyId> {
        self.match_side.last().map(|h| &h.family)
    }

    /// The family through which the reference side reaches the ancestor.
    pub fn reference_family(&self) -> Option<&FamilyId> {
        self.reference_side.last().map(|h| &h.family)
    }

    /// Both sides descend from the ancestor, but through different unions.
    pub fn is_half(&self) -> bool {
        match (self.match_family(), self.reference_family()) {
            (Some(m), Some(r)) => m != r,
            _ => false,
        }
    }

    pub fn is_fully_biological(&self) -> bool {
        self.hops().all(|h| h.kind.is_biological())
    }

    pub fn hops(&self) -> impl Iterator<Item = &Hop> {
        self.match_side.iter().chain(self.reference_side.iter())
    }

    /// Every family on either side.
    pub fn families(&self) -> impl Iterator<Item = &FamilyId> {
        self.hops().map(|h| &h.family)
    }
}
