//! Family (union) in the family graph.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use super::PersonId;

/// Source identifier of a family (the GEDCOM xref without `@`, e.g. `F3`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyId(pub String);

impl FamilyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for FamilyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FamilyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How a child belongs to a family.
///
/// Ordered from most to least biological, so `max` of two kinds is the
/// less biological one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    #[default]
    Biological,
    Step,
    Adopted,
}

impl LinkKind {
    /// Parse a pedigree qualifier (`PEDI`, `_FREL`, `_MREL`).
    /// Unrecognised values (`sealing`, `unknown`, …) give `None`.
    pub fn from_pedigree(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "birth" | "natural" | "biological" => Some(LinkKind::Biological),
            "step" | "foster" | "stepchild" => Some(LinkKind::Step),
            "adopted" | "adoptive" => Some(LinkKind::Adopted),
            _ => None,
        }
    }

    pub fn is_biological(&self) -> bool {
        matches!(self, LinkKind::Biological)
    }

    /// The less biological of two classifications.
    pub fn least_biological(self, other: LinkKind) -> LinkKind {
        self.max(other)
    }

    /// Value written back as `_FREL`/`_MREL`.
    pub fn gedcom_word(&self) -> &'static str {
        match self {
            LinkKind::Biological => "Natural",
            LinkKind::Step => "Step",
            LinkKind::Adopted => "Adopted",
        }
    }
}

/// A child's membership in a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLink {
    pub child: PersonId,
    pub kind: LinkKind,
}

/// A family: up to two parents and an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub husband: Option<PersonId>,
    pub wife: Option<PersonId>,
    pub children: Vec<ChildLink>,
}

impl Family {
    pub fn new(id: FamilyId) -> Self {
        Self { id, husband: None, wife: None, children: Vec::new() }
    }

    /// Parents in display order: wife first, then husband.
    pub fn parents(&self) -> SmallVec<[&PersonId; 2]> {
        self.wife.iter().chain(self.husband.iter()).collect()
    }

    pub fn link_kind_of(&self, child: &PersonId) -> Option<LinkKind> {
        self.children.iter().find(|c| &c.child == child).map(|c| c.kind)
    }

    pub fn has_child(&self, child: &PersonId) -> bool {
        self.children.iter().any(|c| &c.child == child)
    }
}
