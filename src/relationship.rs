//! Relationship naming.
//!
//! A label depends only on the path shape: generations from the match up to
//! the shared ancestor, generations from the reference up to it, and whether
//! the two lines meet through different unions of that ancestor. The amount
//! of shared DNA never enters into it.
//!
//! | match depth | reference depth | label |
//! |---|---|---|
//! | 0 | n | `parent`, `grandparent`, `great-grandparent`, `2x-great-grandparent` |
//! | n | 0 | `child`, `grandchild`, … |
//! | 1 | 1 | `sibling` |
//! | 1 | n | `auncle`, `grandauncle`, … (aunt or uncle) |
//! | n | 1 | `nibling`, `grandnibling`, … (niece or nephew) |
//! | a | b | `{min-1}C{|a-b|}R` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::AncestorPath;

/// Relationship of a match to the reference person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kinship {
    /// Same person.
    Itself,
    /// Match is an ancestor, `generations` above the reference.
    Ancestor { generations: usize },
    /// Match is a descendant, `generations` below the reference.
    Descendant { generations: usize },
    Sibling,
    /// Sibling of an ancestor of the reference; `generations` = 1 for aunt/uncle.
    Auncle { generations: usize },
    /// Descendant of a sibling of the reference; `generations` = 1 for niece/nephew.
    Nibling { generations: usize },
    Cousin { degree: usize, removal: usize },
}

impl Kinship {
    /// Classify a path shape.
    pub fn from_depths(depth_match: usize, depth_reference: usize) -> Self {
        match (depth_match, depth_reference) {
            (0, 0) => Kinship::Itself,
            (0, n) => Kinship::Ancestor { generations: n },
            (n, 0) => Kinship::Descendant { generations: n },
            (1, 1) => Kinship::Sibling,
            (1, n) => Kinship::Auncle { generations: n - 1 },
            (n, 1) => Kinship::Nibling { generations: n - 1 },
            (m, r) => Kinship::Cousin {
                degree: m.min(r) - 1,
                removal: m.abs_diff(r),
            },
        }
    }

    /// Lineal relationships cannot be half.
    pub fn is_lineal(&self) -> bool {
        matches!(self, Kinship::Itself | Kinship::Ancestor { .. } | Kinship::Descendant { .. })
    }

    /// Parent, sibling or child.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            Kinship::Sibling
                | Kinship::Ancestor { generations: 1 }
                | Kinship::Descendant { generations: 1 }
        )
    }
}

impl fmt::Display for Kinship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Kinship::Itself => f.write_str("self"),
            Kinship::Ancestor { generations } => f.write_str(&generational(generations, "parent")),
            Kinship::Descendant { generations } => f.write_str(&generational(generations, "child")),
            Kinship::Sibling => f.write_str("sibling"),
            Kinship::Auncle { generations } => f.write_str(&generational(generations, "auncle")),
            Kinship::Nibling { generations } => f.write_str(&generational(generations, "nibling")),
            Kinship::Cousin { degree, removal: 0 } => write!(f, "{degree}C"),
            Kinship::Cousin { degree, removal } => write!(f, "{degree}C{removal}R"),
        }
    }
}

/// `parent`, `grandparent`, `great-grandparent`, `2x-great-grandparent`, …
fn generational(generations: usize, base: &str) -> String {
    match generations {
        0 | 1 => base.to_string(),
        2 => format!("grand{base}"),
        3 => format!("great-grand{base}"),
        n => format!("{}x-great-grand{base}", n - 2),
    }
}

/// A kinship plus the half flag, e.g. `half-2C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipLabel {
    pub kinship: Kinship,
    pub half: bool,
}

impl RelationshipLabel {
    pub fn new(depth_match: usize, depth_reference: usize, is_half: bool) -> Self {
        let kinship = Kinship::from_depths(depth_match, depth_reference);
        Self { kinship, half: is_half && !kinship.is_lineal() }
    }

    pub fn for_path(path: &AncestorPath) -> Self {
        Self::new(path.depth_match(), path.depth_reference(), path.is_half())
    }

    /// Cousin `(degree, removal)`, ignoring the half flag.
    pub fn cousin_rank(&self) -> Option<(usize, usize)> {
        match self.kinship {
            Kinship::Cousin { degree, removal } => Some((degree, removal)),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.half {
            f.write_str("half-")?;
        }
        write!(f, "{}", self.kinship)
    }
}

/// Name a path shape. Convenience over [`RelationshipLabel::new`].
pub fn name_relationship(depth_match: usize, depth_reference: usize, is_half: bool) -> String {
    RelationshipLabel::new(depth_match, depth_reference, is_half).to_string()
}

/// Plural caption for a shared ancestor couple seen from the reference:
/// `parents`, `grandparents`, `great-grandparents`, …
pub fn ancestor_title(depth_reference: usize) -> String {
    format!("{}s", generational(depth_reference, "parent"))
}
