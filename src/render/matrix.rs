//! Graphviz relationship matrix: one row per relationship group, closest
//! first, each row sorted by shared cM.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::Write;

use crate::analysis::{Analysis, ResolvedMatch};
use crate::config::Config;
use crate::graph::FamilyGraph;
use crate::Result;

use super::{display_name, escape_quoted, write_title, LINE_COLORS};

/// Row a match is drawn in. Variant order is row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    /// Parent, sibling, child.
    Immediate,
    /// Other non-cousins: grandparents, aunts and uncles, nieces and nephews.
    Close,
    Cousin { degree: usize, removal: usize },
    Unconnected,
}

impl Group {
    fn of(resolved: &ResolvedMatch) -> Self {
        let Some(label) = resolved.relationship else { return Group::Unconnected };
        match label.cousin_rank() {
            Some((degree, removal)) => Group::Cousin { degree, removal },
            None if label.kinship.is_immediate() => Group::Immediate,
            None => Group::Close,
        }
    }

    fn graph_name(&self) -> String {
        match *self {
            Group::Immediate => "immediate".to_string(),
            Group::Close => "close".to_string(),
            Group::Cousin { degree, removal: 0 } => format!("g{degree}C"),
            Group::Cousin { degree, removal } => format!("g{degree}C{removal}R"),
            Group::Unconnected => "unconnected".to_string(),
        }
    }

    fn label(&self) -> String {
        match self {
            Group::Immediate => "immediate\\nfamily".to_string(),
            Group::Close => "close\\nfamily".to_string(),
            Group::Cousin { .. } => self.graph_name().trim_start_matches('g').to_string(),
            Group::Unconnected => "unconnected".to_string(),
        }
    }
}

pub fn write_matrix(graph: &FamilyGraph, analysis: &Analysis, config: &Config, out: &mut dyn Write) -> Result<()> {
    let mut groups: BTreeMap<Group, Vec<&ResolvedMatch>> = BTreeMap::new();
    for resolved in &analysis.matches {
        groups.entry(Group::of(resolved)).or_default().push(resolved);
    }

    writeln!(out, "digraph DNA_matches {{")?;
    write_title(config, out)?;
    writeln!(out, "  node [")?;
    writeln!(out, "  style = \"setlinewidth(2)\",")?;
    writeln!(out, "  fontsize = 11, height = 1,")?;
    writeln!(out, "  shape = box, width = 1 ]")?;
    writeln!(out)?;
    writeln!(out, "subgraph self {{")?;
    writeln!(out, "  graph [rank = same]")?;
    writeln!(out, "  edge [style = invis];")?;
    writeln!(out, "  self_label [")?;
    writeln!(
        out,
        "     label = \"{}\",",
        escape_quoted(&display_name(graph, &analysis.reference, config))
    )?;
    writeln!(out, "     height = 1,")?;
    writeln!(out, "     row = top")?;
    writeln!(out, "  ];")?;
    writeln!(out, "}}")?;

    let mut previous = "self".to_string();
    for (n, (group, mut members)) in groups.into_iter().enumerate() {
        members.sort_by_key(|m| (m.dna.cm.is_none(), Reverse(m.dna.cm), m.person().clone()));
        let name = group.graph_name();
        let color = LINE_COLORS[n % LINE_COLORS.len()];

        writeln!(out)?;
        writeln!(out, " subgraph {name} {{")?;
        writeln!(out, "   graph [rank = same]")?;
        writeln!(out, "   node [color=\"{color}\"]")?;
        writeln!(out, "   edge [style = invis];")?;
        writeln!(out, "   {name}_label [")?;
        writeln!(out, "      label = \"{}\",", group.label())?;
        writeln!(out, "      height = 0.5,")?;
        writeln!(out, "      row = top")?;
        writeln!(out, "   ];")?;

        let mut prev_node = format!("{name}_label");
        for (i, member) in members.iter().enumerate() {
            let node = format!("{name}_{}", i + 1);
            writeln!(out, "   {node} [label=\"{}\"]", member_label(graph, member, config))?;
            writeln!(out, "   {prev_node} -> {node}")?;
            prev_node = node;
        }
        writeln!(out, " }}")?;
        writeln!(out)?;
        writeln!(out, "{previous}_label -> {name}_label [style = invis];")?;
        previous = name;
    }

    writeln!(out, "}}")?;
    Ok(())
}

/// Name, then the label when asked for, then the cM value.
fn member_label(graph: &FamilyGraph, member: &ResolvedMatch, config: &Config) -> String {
    let mut label = escape_quoted(&display_name(graph, member.person(), config));
    if let Some(relationship) = member.relationship.filter(|_| config.show_relationship) {
        label.push_str("\\n");
        label.push_str(&relationship.to_string());
    }
    if let Some(cm) = member.dna.cm_label() {
        label.push_str("\\n");
        label.push_str(&cm);
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::gedcom;
    use pretty_assertions::assert_eq;

    /// Siblings I1 (reference), I2, I3 under F1; I4 is a nephew via I2 (F2);
    /// I5 is unrelated.
    const FAMILY: &str = "\
0 @I1@ INDI\n1 NAME Ref /One/\n1 FAMC @F1@\n1 EVEN\n2 TYPE dnamatch\n2 NOTE me\n\
0 @I2@ INDI\n1 NAME Sis /One/\n1 FAMC @F1@\n1 EVEN\n2 TYPE dnamatch\n2 NOTE 2500 cM\n\
0 @I3@ INDI\n1 NAME Bro /One/\n1 FAMC @F1@\n1 EVEN\n2 TYPE dnamatch\n2 NOTE 2700 cM\n\
0 @I4@ INDI\n1 NAME Kid /Two/\n1 FAMC @F2@\n1 EVEN\n2 TYPE dnamatch\n2 NOTE 1600 cM\n\
0 @I5@ INDI\n1 NAME Far /Away/\n1 EVEN\n2 TYPE dnamatch\n2 NOTE 20 cM\n\
0 @I9@ INDI\n\
0 @F1@ FAM\n1 HUSB @I9@\n1 CHIL @I1@\n1 CHIL @I2@\n1 CHIL @I3@\n\
0 @F2@ FAM\n1 WIFE @I2@\n1 CHIL @I4@\n";

    fn render(config: &Config) -> String {
        let doc = gedcom::parse(FAMILY).unwrap();
        let graph = FamilyGraph::build(&doc);
        let result = analysis::analyze(&doc, &graph, config).unwrap();
        let mut out = Vec::new();
        write_matrix(&graph, &result, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_groups_in_order() {
        let dot = render(&Config::default());
        let order: Vec<&str> = dot
            .lines()
            .filter_map(|l| l.trim().strip_prefix("subgraph "))
            .collect();
        assert_eq!(order, vec!["self {", "immediate {", "close {", "unconnected {"]);
        assert!(dot.contains("self_label -> immediate_label [style = invis];"));
        assert!(dot.contains("close_label -> unconnected_label [style = invis];"));
    }

    #[test]
    fn test_members_sorted_by_cm() {
        let mut config = Config::default();
        config.show_relationship = true;
        let dot = render(&config);
        assert!(dot.contains(r#"   immediate_1 [label="Bro One\nsibling\n2700 cM"]"#));
        assert!(dot.contains(r#"   immediate_2 [label="Sis One\nsibling\n2500 cM"]"#));
        assert!(dot.contains(r#"   close_1 [label="Kid Two\nnibling\n1600 cM"]"#));
        // No relationship for a match without a common ancestor.
        assert!(dot.contains(r#"   unconnected_1 [label="Far Away\n20 cM"]"#));
    }

    #[test]
    fn test_cousin_group_names() {
        assert_eq!(Group::Cousin { degree: 1, removal: 0 }.graph_name(), "g1C");
        assert_eq!(Group::Cousin { degree: 2, removal: 1 }.label(), "2C1R");
        assert!(Group::Cousin { degree: 1, removal: 3 } < Group::Cousin { degree: 2, removal: 0 });
        assert!(Group::Close < Group::Cousin { degree: 1, removal: 0 });
    }
}
