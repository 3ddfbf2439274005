//! # GEDCOM Records
//!
//! The record-format collaborator: GEDCOM text in, person/family/event
//! records out. The rest of the crate only sees the `RecordSource` trait.
//!
//! ```text
//! text → lexer::tokenize → parser::parse_records → parser::convert → GedcomDocument
//! ```

pub mod lexer;
pub mod parser;
pub mod records;

use std::path::Path;

use hashbrown::HashMap;

use crate::model::PersonId;
use crate::{Error, Result};

pub use records::{ChildOf, ChildRecord, EventRecord, FamilyRecord, Individual};

// ============================================================================
// RecordSource Trait
// ============================================================================

/// What the core needs from a record parser.
pub trait RecordSource {
    /// Every individual, in source order.
    fn individuals(&self) -> impl Iterator<Item = &Individual>;

    /// Every family, in source order.
    fn families(&self) -> impl Iterator<Item = &FamilyRecord>;

    fn individual(&self, id: &PersonId) -> Option<&Individual>;

    /// The first event of the given type on a person.
    fn find_event(&self, person: &PersonId, event_type: &str) -> Option<&EventRecord> {
        self.individual(person)?.event(event_type)
    }
}

// ============================================================================
// GedcomDocument
// ============================================================================

/// A parsed GEDCOM file.
#[derive(Debug, Default)]
pub struct GedcomDocument {
    individuals: Vec<Individual>,
    families: Vec<FamilyRecord>,
    index: HashMap<PersonId, usize>,
}

impl GedcomDocument {
    pub fn new(individuals: Vec<Individual>, families: Vec<FamilyRecord>) -> Self {
        let mut index = HashMap::with_capacity(individuals.len());
        for (pos, indi) in individuals.iter().enumerate() {
            // First record wins on duplicate xrefs.
            index.entry(indi.id.clone()).or_insert(pos);
        }
        Self { individuals, families, index }
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}

impl RecordSource for GedcomDocument {
    fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    fn families(&self) -> impl Iterator<Item = &FamilyRecord> {
        self.families.iter()
    }

    fn individual(&self, id: &PersonId) -> Option<&Individual> {
        self.index.get(id).map(|&pos| &self.individuals[pos])
    }
}

/// Parse GEDCOM text.
///
/// Fails with [`Error::UnreadableInput`] when a line is malformed or the
/// document holds no individuals at all.
pub fn parse(input: &str) -> Result<GedcomDocument> {
    let lines = lexer::tokenize(input)?;
    let nodes = parser::parse_records(&lines)?;
    let parsed = parser::convert(&nodes);

    if parsed.individuals.is_empty() {
        return Err(Error::UnreadableInput {
            line: lines.last().map_or(0, |l| l.number),
            message: "no individual (INDI) records found".into(),
        });
    }

    tracing::debug!(
        individuals = parsed.individuals.len(),
        families = parsed.families.len(),
        "parsed GEDCOM records"
    );
    Ok(GedcomDocument::new(parsed.individuals, parsed.families))
}

/// Read a GEDCOM file. Bytes that are not valid UTF-8 are replaced.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(path = %path.display(), "input is not valid UTF-8, replacing bad bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
