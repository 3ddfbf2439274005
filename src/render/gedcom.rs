//! Trimmed GEDCOM export: only the displayed persons and families, with the
//! DNA event kept for the reference person and the retained matches.
//!
//! ```text
//! 0 HEAD … 0 @SUB1@ SUBM        header
//! 0 @I1@ INDI …                 displayed persons, id order
//! 0 @F1@ FAM …                  displayed families, id order
//! 0 TRLR
//! ```
//!
//! Record ids are written back unchanged, so the file can be compared
//! against the one it came from.

use std::io::Write;

use crate::analysis::Analysis;
use crate::config::{Config, EventField};
use crate::graph::FamilyGraph;
use crate::model::{Family, LinkKind, Person, Sex};
use crate::Result;

use super::DisplaySet;

const SOURCE: &str = "dna-matches";

pub fn write_gedcom(
    graph: &FamilyGraph,
    analysis: &Analysis,
    display: &DisplaySet<'_>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    write_header(out)?;
    for person in display.persons.iter().filter_map(|id| graph.person(id.as_str())) {
        write_individual(person, graph, analysis, display, config, out)?;
    }
    for family in display.families.iter().filter_map(|id| graph.family(id.as_str())) {
        write_family(family, display, out)?;
    }
    writeln!(out, "0 TRLR")?;
    Ok(())
}

fn write_header(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "0 HEAD")?;
    writeln!(out, "1 SOUR {SOURCE}")?;
    writeln!(out, "1 GEDC")?;
    writeln!(out, "2 VERS 5.5.1")?;
    writeln!(out, "2 FORM LINEAGE-LINKED")?;
    writeln!(out, "1 CHAR UTF-8")?;
    writeln!(out, "1 SUBM @SUB1@")?;
    writeln!(out, "0 @SUB1@ SUBM")?;
    writeln!(out, "1 NAME {SOURCE}")?;
    Ok(())
}

fn write_individual(
    person: &Person,
    graph: &FamilyGraph,
    analysis: &Analysis,
    display: &DisplaySet<'_>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "0 @{}@ INDI", person.id)?;
    if !person.name.raw.is_empty() {
        writeln!(out, "1 NAME {}", person.name.raw)?;
    }
    if person.sex != Sex::Unknown {
        writeln!(out, "1 SEX {}", person.sex.gedcom_code())?;
    }
    for (tag, date) in [("BIRT", &person.birth), ("DEAT", &person.death)] {
        if let Some(date) = date {
            writeln!(out, "1 {tag}")?;
            writeln!(out, "2 DATE {date}")?;
        }
    }
    for family in person.spouse_of.iter().filter(|f| display.shows_family(f)) {
        writeln!(out, "1 FAMS @{family}@")?;
    }
    for family in person.child_of.iter().filter(|f| display.shows_family(f)) {
        writeln!(out, "1 FAMC @{family}@")?;
        let kind = graph
            .family(family.as_str())
            .and_then(|f| f.link_kind_of(&person.id))
            .unwrap_or_default();
        match kind {
            LinkKind::Biological => {}
            LinkKind::Step => writeln!(out, "2 PEDI foster")?,
            LinkKind::Adopted => writeln!(out, "2 PEDI adopted")?,
        }
    }

    let text = if person.id == analysis.reference {
        Some(analysis.reference_text.as_str())
    } else {
        analysis.get(&person.id).map(|m| m.dna.text.as_str())
    };
    if let Some(text) = text {
        match config.field {
            EventField::Note => {
                writeln!(out, "1 EVEN")?;
                writeln!(out, "2 TYPE {}", config.event_name)?;
                write_text(out, 2, "NOTE", text)?;
            }
            EventField::Value => {
                write_text(out, 1, "EVEN", text)?;
                writeln!(out, "2 TYPE {}", config.event_name)?;
            }
        }
    }
    Ok(())
}

fn write_family(family: &Family, display: &DisplaySet<'_>, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "0 @{}@ FAM", family.id)?;
    for (tag, slot) in [("HUSB", &family.husband), ("WIFE", &family.wife)] {
        if let Some(partner) = slot {
            writeln!(out, "1 {tag} @{partner}@")?;
        }
    }
    for link in family.children.iter().filter(|c| display.shows_person(&c.child)) {
        writeln!(out, "1 CHIL @{}@", link.child)?;
        if !link.kind.is_biological() {
            writeln!(out, "2 _FREL {}", link.kind.gedcom_word())?;
            writeln!(out, "2 _MREL {}", link.kind.gedcom_word())?;
        }
    }
    Ok(())
}

/// `level TAG first line`, then one `CONT` line per further line.
fn write_text(out: &mut dyn Write, level: u8, tag: &str, text: &str) -> Result<()> {
    let mut lines = text.lines();
    writeln!(out, "{level} {tag} {}", lines.next().unwrap_or_default())?;
    for line in lines {
        writeln!(out, "{} CONT {line}", level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::gedcom;
    use pretty_assertions::assert_eq;

    /// I1 (reference) and half-sibling I2 share father I3; I2 was adopted
    /// by I5 as well.
    const HALF: &str = "\
0 @I1@ INDI
1 NAME Ref /One/
1 SEX F
1 BIRT
2 DATE 1 JAN 1980
1 FAMC @F1@
1 EVEN
2 TYPE dnamatch
2 NOTE me
0 @I2@ INDI
1 NAME Half /One/
1 FAMC @F2@
1 FAMC @F3@
2 PEDI adopted
1 EVEN
2 TYPE dnamatch
2 NOTE 1750 cM
3 CONT second line
0 @I3@ INDI
1 NAME Dad /One/
1 SEX M
0 @I4@ INDI
1 NAME Mum /Other/
0 @I5@ INDI
1 NAME Adoptive /Parent/
0 @F1@ FAM
1 HUSB @I3@
1 WIFE @I4@
1 CHIL @I1@
0 @F2@ FAM
1 HUSB @I3@
1 CHIL @I2@
0 @F3@ FAM
1 WIFE @I5@
1 CHIL @I2@
";

    #[test]
    fn test_export_keeps_only_displayed_records() {
        let config = Config::new("dnamatch");
        let doc = gedcom::parse(HALF).unwrap();
        let graph = FamilyGraph::build(&doc);
        let result = analysis::analyze(&doc, &graph, &config).unwrap();
        let display = DisplaySet::select(&graph, &result);
        let mut out = Vec::new();
        write_gedcom(&graph, &result, &display, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
0 HEAD
1 SOUR dna-matches
1 GEDC
2 VERS 5.5.1
2 FORM LINEAGE-LINKED
1 CHAR UTF-8
1 SUBM @SUB1@
0 @SUB1@ SUBM
1 NAME dna-matches
0 @I1@ INDI
1 NAME Ref /One/
1 SEX F
1 BIRT
2 DATE 1 JAN 1980
1 FAMC @F1@
1 EVEN
2 TYPE dnamatch
2 NOTE me
0 @I2@ INDI
1 NAME Half /One/
1 FAMC @F2@
1 EVEN
2 TYPE dnamatch
2 NOTE 1750 cM
3 CONT second line
0 @I3@ INDI
1 NAME Dad /One/
1 SEX M
1 FAMS @F1@
1 FAMS @F2@
0 @I4@ INDI
1 NAME Mum /Other/
1 FAMS @F1@
0 @F1@ FAM
1 HUSB @I3@
1 WIFE @I4@
1 CHIL @I1@
0 @F2@ FAM
1 HUSB @I3@
1 CHIL @I2@
0 TRLR
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_value_field_and_adoption_qualifiers() {
        let mut family = Family::new("F9".into());
        family.children.push(crate::model::ChildLink { child: "I1".into(), kind: LinkKind::Adopted });
        let child = crate::model::PersonId::from("I1");
        let mut display = DisplaySet::default();
        display.persons.insert(&child);

        let mut out = Vec::new();
        write_family(&family, &display, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0 @F9@ FAM\n1 CHIL @I1@\n2 _FREL Adopted\n2 _MREL Adopted\n"
        );

        let mut out = Vec::new();
        write_text(&mut out, 1, "EVEN", "20 cM\nsmall segment").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 EVEN 20 cM\n2 CONT small segment\n");
    }
}
