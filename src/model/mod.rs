//! # Family Graph Model
//!
//! Plain data types shared by every stage: persons, families, DNA matches
//! and ancestor paths. These types cross every boundary:
//! records → graph → search → render.
//!
//! Design rule: no I/O and no traversal logic here. This module is pure data.

pub mod person;
pub mod family;
pub mod path;
pub mod dna;

pub use person::{Person, PersonId, PersonName, Sex};
pub use family::{ChildLink, Family, FamilyId, LinkKind};
pub use path::{AncestorPath, Hop};
pub use dna::DnaMatch;
