//! # Rendering
//!
//! Three projections of an [`Analysis`]:
//!
//! - `tree`: Graphviz family tree of the connecting paths
//! - `matrix`: Graphviz chart of matches grouped by relationship
//! - `gedcom`: a trimmed GEDCOM holding only the displayed people
//!
//! Tree and GEDCOM output share one [`DisplaySet`]. Every collection that
//! drives output order is sorted by id, so identical input gives identical
//! bytes.

pub mod gedcom;
pub mod matrix;
pub mod tree;

use std::collections::BTreeSet;
use std::io::Write;

use crate::analysis::Analysis;
use crate::config::{Config, OutputFormat};
use crate::graph::FamilyGraph;
use crate::model::{FamilyId, PersonId};
use crate::Result;

/// Render `analysis` in the configured format.
pub fn render(graph: &FamilyGraph, analysis: &Analysis, config: &Config, out: &mut dyn Write) -> Result<()> {
    match config.format {
        OutputFormat::Tree => {
            let display = DisplaySet::select(graph, analysis);
            tree::write_tree(graph, analysis, &display, config, out)
        }
        OutputFormat::Matrix => matrix::write_matrix(graph, analysis, config, out),
        OutputFormat::Gedcom => {
            let display = DisplaySet::select(graph, analysis);
            gedcom::write_gedcom(graph, analysis, &display, config, out)
        }
    }
}

// ============================================================================
// Display selection
// ============================================================================

/// The families and persons that make it into tree and GEDCOM output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisplaySet<'g> {
    pub families: BTreeSet<&'g FamilyId>,
    pub persons: BTreeSet<&'g PersonId>,
}

impl<'g> DisplaySet<'g> {
    /// Families: every family on a chosen path, plus the shared ancestor's
    /// own birth families for half relationships.
    /// Persons: the reference, the connected matches and every parent of a
    /// displayed family.
    pub fn select(graph: &'g FamilyGraph, analysis: &Analysis) -> Self {
        let mut display = DisplaySet::default();
        if let Some(p) = graph.person(analysis.reference.as_str()) {
            display.persons.insert(&p.id);
        }

        for resolved in analysis.connected() {
            let Some(path) = &resolved.path else { continue };
            if let Some(p) = graph.person(resolved.person().as_str()) {
                display.persons.insert(&p.id);
            }
            for id in path.families() {
                if let Some(f) = graph.family(id.as_str()) {
                    display.families.insert(&f.id);
                }
            }
            if path.is_half() {
                display.families.extend(graph.birth_families(path.ancestor.as_str()).map(|f| &f.id));
            }
        }

        let parents: Vec<&'g PersonId> = display
            .families
            .iter()
            .filter_map(|id| graph.family(id.as_str()))
            .flat_map(|f| f.parents())
            .collect();
        display.persons.extend(parents);
        display
    }

    pub fn shows_family(&self, id: &FamilyId) -> bool {
        self.families.contains(id)
    }

    pub fn shows_person(&self, id: &PersonId) -> bool {
        self.persons.contains(id)
    }
}

// ============================================================================
// Shared text helpers
// ============================================================================

/// Name as charts show it, honouring `--shortname`.
pub(crate) fn display_name(graph: &FamilyGraph, id: &PersonId, config: &Config) -> String {
    graph
        .person(id.as_str())
        .map(|p| p.display_name(config.short_names))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Escape text for a Graphviz HTML-like label.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted Graphviz string.
pub(crate) fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Graphviz node id: prefix plus the record id with anything but ASCII
/// alphanumerics turned into `_`.
pub(crate) fn node_id(prefix: &str, id: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + id.len());
    out.push_str(prefix);
    out.extend(id.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }));
    out
}

/// `label=`/`labelloc=`/`labeljust=` lines for an optional title.
pub(crate) fn write_title(config: &Config, out: &mut dyn Write) -> Result<()> {
    use crate::config::{HorizontalPlacement, VerticalPlacement};

    let Some(title) = config.title.as_deref() else { return Ok(()) };
    writeln!(out, "label=\"{}\";", escape_quoted(title))?;
    match config.title_placement.vertical {
        VerticalPlacement::Top => writeln!(out, "labelloc=\"t\";")?,
        VerticalPlacement::Bottom => writeln!(out, "labelloc=\"b\";")?,
    }
    match config.title_placement.horizontal {
        HorizontalPlacement::Center => {}
        HorizontalPlacement::Left => writeln!(out, "labeljust=\"l\";")?,
        HorizontalPlacement::Right => writeln!(out, "labeljust=\"r\";")?,
    }
    Ok(())
}

/// Edge colours for busy families and matrix groups.
pub(crate) const LINE_COLORS: [&str; 11] = [
    "orchid",
    "tomato",
    "lightseagreen",
    "chocolate",
    "forestgreen",
    "darkorange",
    "teal",
    "yellowgreen",
    "coral",
    "royalblue",
    "salmon",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::gedcom as records;

    #[test]
    fn test_node_id_and_escapes() {
        assert_eq!(node_id("p_", "I12"), "p_I12");
        assert_eq!(node_id("f_", "F-1.2"), "f_F_1_2");
        assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
        assert_eq!(escape_quoted(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn test_display_set_for_half_siblings() {
        // I3 had I1 with I4 (F1) and I2 with I5 (F2). I3's parents are F0.
        let text = "\
0 @I1@ INDI
1 FAMC @F1@
1 EVEN
2 TYPE dnamatch
2 NOTE me
0 @I2@ INDI
1 FAMC @F2@
1 EVEN
2 TYPE dnamatch
2 NOTE 1700 cM
0 @I3@ INDI
1 FAMC @F0@
0 @I4@ INDI
0 @I5@ INDI
0 @I6@ INDI
0 @F0@ FAM
1 HUSB @I6@
1 CHIL @I3@
0 @F1@ FAM
1 HUSB @I3@
1 WIFE @I4@
1 CHIL @I1@
0 @F2@ FAM
1 HUSB @I3@
1 WIFE @I5@
1 CHIL @I2@
";
        let doc = records::parse(text).unwrap();
        let graph = FamilyGraph::build(&doc);
        let result = analysis::analyze(&doc, &graph, &Config::default()).unwrap();
        let display = DisplaySet::select(&graph, &result);

        let families: Vec<&str> = display.families.iter().map(|f| f.as_str()).collect();
        assert_eq!(families, vec!["F0", "F1", "F2"]);
        let persons: Vec<&str> = display.persons.iter().map(|p| p.as_str()).collect();
        assert_eq!(persons, vec!["I1", "I2", "I3", "I4", "I5", "I6"]);
    }
}
