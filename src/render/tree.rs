//! Graphviz family tree.
//!
//! ```text
//! digraph family {
//! node [shape=plaintext];
//! edge [penwidth=1];
//! rankdir=LR;
//! f_F1 [label=<...>];        one HTML table per family: w, u (union), h
//! p_I7 [label=<...>];        persons who are nobody's partner here
//! p_I7:i -> f_F1:u;          child → parents' union
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::analysis::Analysis;
use crate::config::Config;
use crate::graph::FamilyGraph;
use crate::model::{Family, FamilyId, PersonId};
use crate::relationship::ancestor_title;
use crate::Result;

use super::{display_name, escape_html, node_id, write_title, DisplaySet, LINE_COLORS};

pub const MATCH_COLOR: &str = "springgreen";
pub const REFERENCE_COLOR: &str = "lightblue";
pub const MULTI_FAMILY_COLOR: &str = "#ffc000";

/// A family receiving this many edges or more gets coloured edges.
const BUSY_FAMILY_EDGES: usize = 3;

const TABLE_OPEN: &str = r#"<table cellpadding="3" border="1" cellspacing="0" cellborder="0">"#;

pub fn write_tree(
    graph: &FamilyGraph,
    analysis: &Analysis,
    display: &DisplaySet<'_>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "digraph family {{")?;
    writeln!(out, "node [shape=plaintext];")?;
    writeln!(out, "edge [penwidth={}];", config.thickness)?;
    writeln!(out, "rankdir={};", config.orientation.rankdir())?;
    write_title(config, out)?;

    let captions = ancestor_captions(graph, analysis);
    let cells = Cells { graph, analysis, config };

    let mut partners: BTreeSet<&PersonId> = BTreeSet::new();
    for family in display.families.iter().filter_map(|id| graph.family(id.as_str())) {
        partners.extend(family.parents());
        let caption = captions.get(&family.id).map(String::as_str);
        write_node(out, &node_id("f_", family.id.as_str()), &cells.family_rows(family, caption))?;
    }
    for &person in display.persons.iter().filter(|p| !partners.contains(*p)) {
        write_node(out, &node_id("p_", person.as_str()), &cells.row(person, "i"))?;
    }

    write_edges(graph, display, &partners, config, out)?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_node(out: &mut dyn Write, id: &str, rows: &str) -> Result<()> {
    writeln!(out, "{id} [label=<\n{TABLE_OPEN}\n{rows}</table>>];")?;
    Ok(())
}

/// Captions for the topmost reference-side family of each path, unless a
/// partner there is already highlighted.
fn ancestor_captions(graph: &FamilyGraph, analysis: &Analysis) -> BTreeMap<FamilyId, String> {
    let mut depths: BTreeMap<&FamilyId, usize> = BTreeMap::new();
    for path in analysis.connected().filter_map(|m| m.path.as_ref()) {
        let Some(family) = path.reference_family() else { continue };
        let depth = path.depth_reference();
        depths.entry(family).and_modify(|d| *d = (*d).min(depth)).or_insert(depth);
    }
    depths
        .into_iter()
        .filter(|(id, _)| {
            graph.family(id.as_str()).is_some_and(|f| {
                f.parents()
                    .iter()
                    .all(|p| **p != analysis.reference && analysis.connected_match(p).is_none())
            })
        })
        .map(|(id, depth)| (id.clone(), ancestor_title(depth)))
        .collect()
}

struct Cells<'a> {
    graph: &'a FamilyGraph,
    analysis: &'a Analysis,
    config: &'a Config,
}

impl Cells<'_> {
    /// Wife, union marker, husband, then the optional caption.
    fn family_rows(&self, family: &Family, caption: Option<&str>) -> String {
        let mut rows = String::new();
        for (i, (slot, port)) in [(&family.wife, "w"), (&family.husband, "h")].into_iter().enumerate() {
            match slot {
                Some(person) => rows.push_str(&self.row(person, port)),
                None => rows.push_str("<tr><td>unknown</td></tr>\n"),
            }
            if i == 0 {
                rows.push_str("<tr><td port=\"u\" cellpadding=\"0\" cellspacing=\"0\">&amp;</td></tr>\n");
            }
        }
        if let Some(caption) = caption {
            rows.push_str(&format!(
                "<tr><td bgcolor=\"{REFERENCE_COLOR}\">{}</td></tr>\n",
                escape_html(caption)
            ));
        }
        rows
    }

    /// One table row for a person, highlighted when it is a connected match
    /// or the reference person.
    fn row(&self, id: &PersonId, port: &str) -> String {
        let mut attrs = format!(" port=\"{port}\"");
        let mut text = escape_html(&display_name(self.graph, id, self.config));

        if *id == self.analysis.reference {
            attrs.push_str(&format!(" bgcolor=\"{REFERENCE_COLOR}\""));
        } else if let Some(resolved) = self.analysis.connected_match(id) {
            attrs.push_str(&format!(" bgcolor=\"{MATCH_COLOR}\""));
            if let Some(cm) = resolved.dna.cm_label() {
                text.push_str("<br/>");
                text.push_str(&cm);
            }
            if let Some(label) = resolved.relationship.filter(|_| self.config.show_relationship) {
                text.push_str("<br/>");
                text.push_str(&escape_html(&label.to_string()));
            }
        }
        if self.graph.person(id.as_str()).is_some_and(|p| p.multi_family) {
            attrs.push_str(&format!(" border=\"2\" color=\"{MULTI_FAMILY_COLOR}\""));
        }
        format!("<tr><td{attrs}>{text}</td></tr>\n")
    }
}

/// Child cell → union port of every displayed birth family.
fn write_edges(
    graph: &FamilyGraph,
    display: &DisplaySet<'_>,
    partners: &BTreeSet<&PersonId>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let mut routes: BTreeSet<(String, String)> = BTreeSet::new();
    let mut add_routes = |person: &PersonId, source: String| {
        for parent_family in graph.birth_families(person.as_str()) {
            if display.shows_family(&parent_family.id) {
                routes.insert((source.clone(), format!("{}:u", node_id("f_", parent_family.id.as_str()))));
            }
        }
    };

    for family in display.families.iter().filter_map(|id| graph.family(id.as_str())) {
        for (slot, port) in [(&family.wife, "w"), (&family.husband, "h")] {
            if let Some(person) = slot {
                add_routes(person, format!("{}:{port}", node_id("f_", family.id.as_str())));
            }
        }
    }
    for &person in display.persons.iter().filter(|p| !partners.contains(*p)) {
        add_routes(person, format!("{}:i", node_id("p_", person.as_str())));
    }

    let mut incoming: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, target) in &routes {
        *incoming.entry(target.as_str()).or_default() += 1;
    }
    let mut colors: BTreeMap<&str, &str> = BTreeMap::new();
    let mut next = 0;
    for (_, target) in &routes {
        if incoming[target.as_str()] >= BUSY_FAMILY_EDGES && !colors.contains_key(target.as_str()) {
            colors.insert(target.as_str(), LINE_COLORS[next % LINE_COLORS.len()]);
            next += 1;
        }
    }

    for (source, target) in &routes {
        let color = colors
            .get(target.as_str())
            .map(|c| format!(" [color={c}]"))
            .unwrap_or_default();
        if config.reverse_arrows {
            writeln!(out, "{target} -> {source}{color};")?;
        } else {
            writeln!(out, "{source} -> {target}{color};")?;
        }
    }
    Ok(())
}
