//! # dna-matches: DNA match relationship charts from GEDCOM
//!
//! Finds, for one reference person, the nearest shared ancestor of every
//! DNA match recorded in a genealogy file, names the relationship
//! (`sibling`, `1C1R`, `half-2C`, …) and draws the result.
//!
//! ## Pipeline
//!
//! 1. **Records**: `gedcom` turns GEDCOM text into person/family/event records
//!    behind the `RecordSource` trait.
//! 2. **Graph**: `graph::FamilyGraph` is an id-indexed arena of persons and
//!    families with directed parent→child links.
//! 3. **Extract**: `extract` finds the reference person and the DNA matches.
//! 4. **Search**: `search` runs the two-sided ancestor BFS and the
//!    deterministic path selector.
//! 5. **Name**: `relationship` labels the chosen path shape.
//! 6. **Render**: `render` writes a Graphviz tree, a relationship matrix, or
//!    a trimmed GEDCOM.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dna_matches::{Config, OutputFormat};
//!
//! # fn example() -> dna_matches::Result<()> {
//! let mut config = Config::new("dnamatch");
//! config.format = OutputFormat::Tree;
//! config.show_relationship = true;
//!
//! let dot = dna_matches::draw_file("family.ged", &config)?;
//! println!("{dot}");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod gedcom;
pub mod graph;
pub mod config;
pub mod extract;
pub mod search;
pub mod relationship;
pub mod analysis;
pub mod render;

use std::path::Path;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    AncestorPath, ChildLink, DnaMatch, Family, FamilyId, Hop, LinkKind, Person, PersonId,
    PersonName, Sex,
};
pub use gedcom::{GedcomDocument, RecordSource};
pub use graph::FamilyGraph;
pub use config::{
    Config, EventField, OutputFormat, Orientation, TitlePlacement, ValueMode,
};
pub use analysis::{Analysis, Diagnostic, ResolvedMatch};
pub use relationship::{Kinship, RelationshipLabel};

// ============================================================================
// Top-level entry points
// ============================================================================

/// Run the whole pipeline over GEDCOM text and return the rendered output.
///
/// Rendering happens into memory, so a fatal error never leaves partial
/// output behind.
pub fn draw_matches(input: &str, config: &Config) -> Result<String> {
    config.validate()?;

    let document = gedcom::parse(input)?;
    let graph = FamilyGraph::build(&document);
    let analysis = analysis::analyze(&document, &graph, config)?;

    let mut out = Vec::new();
    render::render(&graph, &analysis, config, &mut out)?;

    String::from_utf8(out).map_err(|e| Error::UnreadableInput {
        line: 0,
        message: format!("rendered output is not UTF-8: {e}"),
    })
}

/// Read a GEDCOM file and run [`draw_matches`] on it.
pub fn draw_file(path: impl AsRef<Path>, config: &Config) -> Result<String> {
    let input = gedcom::read_file(path.as_ref())?;
    draw_matches(&input, config)
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no reference person: nobody has a \"{event}\" event starting with \"me\"")]
    MissingReferencePerson { event: String },

    #[error("more than one reference person marked \"me\": {}", ids.join(", "))]
    AmbiguousReferencePerson { ids: Vec<String> },

    #[error("nobody has an event of type \"{event}\" with a {field}")]
    EventNotFound { event: String, field: EventField },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unreadable input at line {line}: {message}")]
    UnreadableInput { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
