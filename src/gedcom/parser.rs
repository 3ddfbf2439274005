//! GEDCOM parser. Nests lines by level, then converts level-0 nodes into
//! records.
//!
//! Only the tags the DNA charts need are read: names, sex, birth and death
//! dates, family links with pedigree qualifiers, and custom `EVEN` events.
//! Everything else is skipped.

use hashbrown::HashMap;

use crate::model::{FamilyId, LinkKind, PersonId, PersonName, Sex};
use crate::{Error, Result};
use super::lexer::{Line, is_pointer, strip_pointer};
use super::records::*;

/// A line with its subordinate lines.
#[derive(Debug, Clone)]
pub struct Node {
    pub line: Line,
    pub children: Vec<Node>,
}

impl Node {
    pub fn tag(&self) -> &str {
        &self.line.tag
    }

    /// Line value with `CONT`/`CONC` continuations folded in.
    pub fn text(&self) -> Option<String> {
        let mut text = self.line.value.clone();
        for child in &self.children {
            let piece = child.line.value.as_deref().unwrap_or("");
            match child.tag() {
                "CONT" => {
                    let t = text.get_or_insert_with(String::new);
                    t.push('\n');
                    t.push_str(piece);
                }
                "CONC" => text.get_or_insert_with(String::new).push_str(piece),
                _ => {}
            }
        }
        text
    }

    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag() == tag)
    }

    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.tag() == tag)
    }

    fn child_text(&self, tag: &str) -> Option<String> {
        self.child(tag).and_then(Node::text).map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }

    fn pointer_value(&self) -> Option<&str> {
        self.line
            .value
            .as_deref()
            .map(str::trim)
            .filter(|v| is_pointer(v))
            .map(strip_pointer)
    }
}

/// Line slice plus cursor.
struct Parser<'t> {
    lines: &'t [Line],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(lines: &'t [Line]) -> Self {
        Self { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Line> {
        self.lines.get(self.pos)
    }

    /// Parse the line at the cursor and every deeper line after it.
    fn parse_node(&mut self) -> Node {
        let line = self.lines[self.pos].clone();
        self.pos += 1;

        let mut children = Vec::new();
        while let Some(next) = self.peek() {
            if next.level <= line.level {
                break;
            }
            // Skipped levels are tolerated and nest under the nearest parent.
            children.push(self.parse_node());
        }
        Node { line, children }
    }

    fn parse_all(&mut self) -> Result<Vec<Node>> {
        let mut records = Vec::new();
        while let Some(line) = self.peek() {
            if line.level != 0 {
                return Err(Error::UnreadableInput {
                    line: line.number,
                    message: format!("expected a level 0 record, got level {}", line.level),
                });
            }
            records.push(self.parse_node());
        }
        Ok(records)
    }
}

/// Nest tokenized lines into level-0 record trees.
pub fn parse_records(lines: &[Line]) -> Result<Vec<Node>> {
    Parser::new(lines).parse_all()
}

/// Records converted from the level-0 nodes.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub individuals: Vec<Individual>,
    pub families: Vec<FamilyRecord>,
}

pub fn convert(nodes: &[Node]) -> ParsedRecords {
    let notes: HashMap<&str, String> = nodes
        .iter()
        .filter(|n| n.tag() == "NOTE")
        .filter_map(|n| Some((n.line.xref.as_deref()?, n.text().unwrap_or_default())))
        .collect();

    let mut parsed = ParsedRecords::default();
    for node in nodes {
        let Some(xref) = node.line.xref.as_deref() else { continue };
        match node.tag() {
            "INDI" => parsed.individuals.push(convert_individual(xref, node, &notes)),
            "FAM" => parsed.families.push(convert_family(xref, node)),
            _ => {}
        }
    }
    parsed
}

fn convert_individual(xref: &str, node: &Node, notes: &HashMap<&str, String>) -> Individual {
    let mut indi = Individual::new(PersonId::from(xref));

    if let Some(name) = node.child("NAME") {
        let mut parsed = PersonName::parse(&name.text().unwrap_or_default());
        if let Some(given) = name.child_text("GIVN") {
            parsed.given = Some(given);
        }
        if let Some(surname) = name.child_text("SURN") {
            parsed.surname = Some(surname);
        }
        indi.name = parsed;
    }

    if let Some(sex) = node.child("SEX").and_then(|n| n.line.value.as_deref()) {
        indi.sex = Sex::from_gedcom(sex);
    }

    indi.birth = first_date(node, "BIRT");
    indi.death = first_date(node, "DEAT");

    for famc in node.children_tagged("FAMC") {
        if let Some(fam) = famc.pointer_value() {
            indi.child_of.push(ChildOf {
                family: FamilyId::from(fam),
                pedigree: famc.child_text("PEDI").as_deref().and_then(LinkKind::from_pedigree),
            });
        }
    }

    for fams in node.children_tagged("FAMS") {
        if let Some(fam) = fams.pointer_value() {
            indi.spouse_of.push(FamilyId::from(fam));
        }
    }

    for even in node.children_tagged("EVEN") {
        let note = even.child("NOTE").and_then(|n| match n.pointer_value() {
            Some(ptr) => notes.get(ptr).cloned(),
            None => n.text(),
        });
        indi.events.push(EventRecord {
            event_type: even.child_text("TYPE"),
            value: even.text().filter(|v| !v.trim().is_empty()),
            note: note.filter(|n| !n.trim().is_empty()),
        });
    }

    indi
}

fn convert_family(xref: &str, node: &Node) -> FamilyRecord {
    let mut fam = FamilyRecord::new(FamilyId::from(xref));
    fam.husband = node.child("HUSB").and_then(Node::pointer_value).map(PersonId::from);
    fam.wife = node.child("WIFE").and_then(Node::pointer_value).map(PersonId::from);

    for chil in node.children_tagged("CHIL") {
        let Some(child) = chil.pointer_value() else { continue };
        let kind = ["_FREL", "_MREL"]
            .iter()
            .filter_map(|tag| chil.child_text(tag))
            .filter_map(|v| LinkKind::from_pedigree(&v))
            .reduce(LinkKind::least_biological);
        fam.children.push(ChildRecord { child: PersonId::from(child), kind });
    }

    fam
}

/// Date of the first `tag` event carrying one.
fn first_date(node: &Node, tag: &str) -> Option<String> {
    node.children_tagged(tag).find_map(|e| e.child_text("DATE"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::lexer::tokenize;

    fn records(text: &str) -> ParsedRecords {
        let lines = tokenize(text).unwrap();
        convert(&parse_records(&lines).unwrap())
    }

    #[test]
    fn test_continuations_fold() {
        let lines = tokenize("0 @N1@ NOTE first\n1 CONT second\n1 CONC  half\n").unwrap();
        let nodes = parse_records(&lines).unwrap();
        assert_eq!(nodes[0].text().as_deref(), Some("first\nsecond half"));
    }

    #[test]
    fn test_event_with_pointer_note() {
        let parsed = records(
            "0 @I1@ INDI\n1 NAME Ann /Lee/\n1 EVEN\n2 TYPE dnamatch\n2 NOTE @N1@\n0 @N1@ NOTE 88 cM\n",
        );
        let event = parsed.individuals[0].event("DNAMATCH").unwrap();
        assert_eq!(event.note.as_deref(), Some("88 cM"));
        assert_eq!(event.value, None);
    }

    #[test]
    fn test_pedigree_qualifiers() {
        let parsed = records(
            "0 @I1@ INDI\n1 FAMC @F1@\n2 PEDI adopted\n0 @F1@ FAM\n1 CHIL @I1@\n2 _FREL Natural\n2 _MREL Step\n",
        );
        assert_eq!(parsed.individuals[0].child_of[0].pedigree, Some(LinkKind::Adopted));
        assert_eq!(parsed.families[0].children[0].kind, Some(LinkKind::Step));
    }

    #[test]
    fn test_orphan_deeper_line_rejected() {
        let lines = tokenize("1 NAME nobody\n").unwrap();
        assert!(parse_records(&lines).is_err());
    }
}
