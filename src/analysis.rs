//! # Analysis
//!
//! Ties extraction, path search and naming together. The result holds every
//! retained match with its chosen path and label, plus the non-fatal
//! diagnostics gathered on the way. Rendering reads only this and the graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::extract;
use crate::gedcom::RecordSource;
use crate::graph::FamilyGraph;
use crate::model::{AncestorPath, DnaMatch, PersonId};
use crate::relationship::RelationshipLabel;
use crate::search::PathFinder;
use crate::Result;

/// A retained DNA match after path search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    pub dna: DnaMatch,
    /// `None` when no shared ancestor exists in the data.
    pub path: Option<AncestorPath>,
    pub relationship: Option<RelationshipLabel>,
}

impl ResolvedMatch {
    pub fn person(&self) -> &PersonId {
        &self.dna.person
    }

    pub fn is_connected(&self) -> bool {
        self.path.is_some()
    }
}

/// A condition worth reporting that does not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// No common ancestor with the reference person.
    UnconnectedMatch { person: PersonId },
    /// The event text held no cM value; the match is kept without one.
    UnparseableMatchValue { person: PersonId, text: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnconnectedMatch { person } => {
                write!(f, "{person}: no common ancestor with the reference person")
            }
            Diagnostic::UnparseableMatchValue { person, text } => {
                write!(f, "{person}: no cM value in \"{text}\"")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub reference: PersonId,
    /// Event text of the reference person.
    pub reference_text: String,
    /// Retained matches, in source order.
    pub matches: Vec<ResolvedMatch>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn connected(&self) -> impl Iterator<Item = &ResolvedMatch> {
        self.matches.iter().filter(|m| m.is_connected())
    }

    pub fn unconnected(&self) -> impl Iterator<Item = &ResolvedMatch> {
        self.matches.iter().filter(|m| !m.is_connected())
    }

    pub fn get(&self, person: &PersonId) -> Option<&ResolvedMatch> {
        self.matches.iter().find(|m| m.person() == person)
    }

    /// The match entry of `person`, if it is connected to the reference.
    pub fn connected_match(&self, person: &PersonId) -> Option<&ResolvedMatch> {
        self.get(person).filter(|m| m.is_connected())
    }
}

/// Extract the matches from `source`, then find and name a path for each.
pub fn analyze<S: RecordSource>(source: &S, graph: &FamilyGraph, config: &Config) -> Result<Analysis> {
    let extraction = extract::extract(source, config)?;
    let mut diagnostics: Vec<Diagnostic> = extraction
        .unparsed()
        .map(|m| Diagnostic::UnparseableMatchValue { person: m.person.clone(), text: m.text.clone() })
        .collect();

    let finder = PathFinder::new(graph, extraction.reference.as_str(), config);
    let mut matches = Vec::with_capacity(extraction.matches.len());
    for dna in extraction.matches {
        let path = finder.find(dna.person.as_str());
        if path.is_none() {
            diagnostics.push(Diagnostic::UnconnectedMatch { person: dna.person.clone() });
        }
        let relationship = path.as_ref().map(RelationshipLabel::for_path);
        matches.push(ResolvedMatch { dna, path, relationship });
    }

    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }
    info!(
        reference = %extraction.reference,
        connected = matches.iter().filter(|m| m.is_connected()).count(),
        unconnected = matches.iter().filter(|m| !m.is_connected()).count(),
        out_of_range = extraction.out_of_range.len(),
        "matches resolved"
    );

    Ok(Analysis {
        reference: extraction.reference,
        reference_text: extraction.reference_text,
        matches,
        diagnostics,
    })
}
