//! End-to-end relationship naming.
//!
//! Each test exercises: GEDCOM text -> records -> graph -> extraction ->
//! ancestor search -> path selection -> naming.

use dna_matches::analysis::analyze;
use dna_matches::{gedcom, Config, FamilyGraph, PersonId};

// ============================================================================
// Helper: GEDCOM text builders
// ============================================================================

fn indi(id: &str, name: &str, note: Option<&str>) -> String {
    let mut s = format!("0 @{id}@ INDI\n1 NAME {name}\n");
    if let Some(note) = note {
        s.push_str(&format!("1 EVEN\n2 TYPE DNA\n2 NOTE {note}\n"));
    }
    s
}

fn fam(id: &str, husband: Option<&str>, wife: Option<&str>, children: &[&str]) -> String {
    let mut s = format!("0 @{id}@ FAM\n");
    if let Some(h) = husband {
        s.push_str(&format!("1 HUSB @{h}@\n"));
    }
    if let Some(w) = wife {
        s.push_str(&format!("1 WIFE @{w}@\n"));
    }
    for c in children {
        s.push_str(&format!("1 CHIL @{c}@\n"));
    }
    s
}

/// Labels of every connected match, by person id.
fn labels(text: &str) -> Vec<(String, String)> {
    let doc = gedcom::parse(text).unwrap();
    let graph = FamilyGraph::build(&doc);
    let analysis = analyze(&doc, &graph, &Config::new("DNA")).unwrap();
    analysis
        .matches
        .iter()
        .filter_map(|m| Some((m.person().to_string(), m.relationship?.to_string())))
        .collect()
}

fn label_of(labels: &[(String, String)], id: &str) -> String {
    labels
        .iter()
        .find(|(p, _)| p == id)
        .map(|(_, l)| l.clone())
        .unwrap_or_else(|| panic!("{id} has no relationship"))
}

/// Four generations below I1 + I2, with a second marriage of I3.
///
/// ```text
/// I1+I2 (F1) ─┬─ I3 +I5 (F2) ─┬─ I7 +I10 (F4) ── I11 (me), I20
///             │               └─ I8 +I12 (F5) ── I13
///             │    +I18 (F8) ──── I19 (F9) ── I21
///             └─ I4 +I6 (F3) ──── I9 +I14 (F6) ── I15 +I16 (F7) ── I17
/// ```
fn extended_family() -> String {
    [
        indi("I1", "Great /Grandpa/", Some("400 cM")),
        indi("I2", "Great /Grandma/", None),
        indi("I3", "Grand /Pa/", Some("900 cM")),
        indi("I4", "Great /Aunt/", Some("430 cM")),
        indi("I5", "Grand /Ma/", None),
        indi("I6", "In /Law/", None),
        indi("I7", "Dad /Tester/", Some("3400 cM")),
        indi("I8", "Aunt /Tester/", Some("1700 cM")),
        indi("I9", "Cousin /Once/", Some("450 cM")),
        indi("I10", "Mum /Tester/", None),
        indi("I11", "Me /Tester/", Some("me")),
        indi("I12", "Uncle /Bymarriage/", None),
        indi("I13", "First /Cousin/", Some("850 cM")),
        indi("I14", "Other /Spouse/", None),
        indi("I15", "Second /Cousin/", Some("230 cM")),
        indi("I16", "Second /Spouse/", None),
        indi("I17", "Removed /Cousin/", Some("110 cM")),
        indi("I18", "Second /Wife/", None),
        indi("I19", "Half /Aunt/", Some("850 cM")),
        indi("I20", "Sis /Tester/", Some("2600 cM")),
        indi("I21", "Half /Cousin/", Some("420 cM")),
        fam("F1", Some("I1"), Some("I2"), &["I3", "I4"]),
        fam("F2", Some("I3"), Some("I5"), &["I7", "I8"]),
        fam("F3", Some("I6"), Some("I4"), &["I9"]),
        fam("F4", Some("I7"), Some("I10"), &["I11", "I20"]),
        fam("F5", Some("I12"), Some("I8"), &["I13"]),
        fam("F6", Some("I9"), Some("I14"), &["I15"]),
        fam("F7", Some("I15"), Some("I16"), &["I17"]),
        fam("F8", Some("I3"), Some("I18"), &["I19"]),
        fam("F9", None, Some("I19"), &["I21"]),
    ]
    .concat()
}

// ============================================================================
// 1. Direct lines
// ============================================================================

#[test]
fn test_direct_ancestors() {
    let labels = labels(&extended_family());
    assert_eq!(label_of(&labels, "I7"), "parent");
    assert_eq!(label_of(&labels, "I3"), "grandparent");
    assert_eq!(label_of(&labels, "I1"), "great-grandparent");
}

// ============================================================================
// 2. Siblings, aunts and uncles
// ============================================================================

#[test]
fn test_sibling_and_auncles() {
    let labels = labels(&extended_family());
    assert_eq!(label_of(&labels, "I20"), "sibling");
    assert_eq!(label_of(&labels, "I8"), "auncle");
    assert_eq!(label_of(&labels, "I4"), "grandauncle");
}

// ============================================================================
// 3. Cousins
// ============================================================================

#[test]
fn test_cousins() {
    let labels = labels(&extended_family());
    assert_eq!(label_of(&labels, "I13"), "1C");
    assert_eq!(label_of(&labels, "I9"), "1C1R");
    assert_eq!(label_of(&labels, "I15"), "2C");
    assert_eq!(label_of(&labels, "I17"), "2C1R");
}

// ============================================================================
// 4. Half relationships through a second marriage
// ============================================================================

#[test]
fn test_half_relationships() {
    let labels = labels(&extended_family());
    assert_eq!(label_of(&labels, "I19"), "half-auncle");
    assert_eq!(label_of(&labels, "I21"), "half-1C");
}

#[test]
fn test_half_second_cousins() {
    // G had C1 with W1 (F1) and C2 with W2 (F2); their grandchildren are
    // half second cousins.
    let text = [
        indi("G", "Gramps /X/", None),
        indi("W1", "First /Wife/", None),
        indi("W2", "Second /Wife/", None),
        indi("C1", "Child /One/", None),
        indi("C2", "Child /Two/", None),
        indi("D1", "Grand /One/", None),
        indi("D2", "Grand /Two/", None),
        indi("E1", "Me /One/", Some("me")),
        indi("E2", "Match /Two/", Some("95.5 cM")),
        fam("F1", Some("G"), Some("W1"), &["C1"]),
        fam("F2", Some("G"), Some("W2"), &["C2"]),
        fam("F3", Some("C1"), None, &["D1"]),
        fam("F4", Some("C2"), None, &["D2"]),
        fam("F5", Some("D1"), None, &["E1"]),
        fam("F6", Some("D2"), None, &["E2"]),
    ]
    .concat();
    assert_eq!(label_of(&labels(&text), "E2"), "half-2C");
}

// ============================================================================
// 5. Biological routes beat adoptive ones
// ============================================================================

#[test]
fn test_biological_route_preferred_over_adoption() {
    // M was born to A and X (F2) and adopted into A and B's family (F1),
    // where R was born. Via F1 they would be full siblings; biology says half.
    let text = "\
0 @A@ INDI
0 @B@ INDI
0 @X@ INDI
0 @R@ INDI
1 EVEN
2 TYPE DNA
2 NOTE me
0 @M@ INDI
1 FAMC @F1@
2 PEDI adopted
1 FAMC @F2@
1 EVEN
2 TYPE DNA
2 NOTE 1800 cM
0 @F1@ FAM
1 HUSB @A@
1 WIFE @B@
1 CHIL @R@
1 CHIL @M@
0 @F2@ FAM
1 HUSB @A@
1 WIFE @X@
1 CHIL @M@
";
    assert_eq!(label_of(&labels(text), "M"), "half-sibling");

    let doc = gedcom::parse(text).unwrap();
    let graph = FamilyGraph::build(&doc);
    let analysis = analyze(&doc, &graph, &Config::new("dna")).unwrap();
    let path = analysis.get(&PersonId::from("M")).unwrap().path.clone().unwrap();
    assert!(path.is_fully_biological());
    assert_eq!(path.ancestor.as_str(), "A");
}

#[test]
fn test_adoption_only_route_still_connects() {
    let text = "\
0 @A@ INDI
0 @R@ INDI
1 FAMC @F1@
1 EVEN
2 TYPE DNA
2 NOTE me
0 @M@ INDI
1 FAMC @F1@
2 PEDI adopted
1 EVEN
2 TYPE DNA
2 NOTE 12 cM
0 @F1@ FAM
1 HUSB @A@
";
    assert_eq!(label_of(&labels(text), "M"), "sibling");
}

#[test]
fn test_deeper_biological_ancestor_beats_nearer_adoptive_one() {
    // R was born to P and Q (F2) and adopted into A and B's family (F1),
    // where M was born. A and P are brothers under G and H (F0). The
    // adoption makes them siblings; by birth they are first cousins.
    let text = "\
0 @G@ INDI
0 @H@ INDI
0 @A@ INDI
1 FAMC @F0@
0 @B@ INDI
0 @P@ INDI
1 FAMC @F0@
0 @Q@ INDI
0 @R@ INDI
1 FAMC @F1@
2 PEDI adopted
1 FAMC @F2@
1 EVEN
2 TYPE DNA
2 NOTE me
0 @M@ INDI
1 FAMC @F1@
1 EVEN
2 TYPE DNA
2 NOTE 850 cM
0 @F0@ FAM
1 HUSB @G@
1 WIFE @H@
1 CHIL @A@
1 CHIL @P@
0 @F1@ FAM
1 HUSB @A@
1 WIFE @B@
1 CHIL @M@
1 CHIL @R@
0 @F2@ FAM
1 HUSB @P@
1 WIFE @Q@
1 CHIL @R@
";
    assert_eq!(label_of(&labels(text), "M"), "1C");

    let doc = gedcom::parse(text).unwrap();
    let graph = FamilyGraph::build(&doc);
    let analysis = analyze(&doc, &graph, &Config::new("dna")).unwrap();
    let path = analysis.get(&PersonId::from("M")).unwrap().path.clone().unwrap();
    assert!(path.is_fully_biological());
    assert_eq!(path.ancestor.as_str(), "G");
    assert_eq!((path.depth_match(), path.depth_reference()), (2, 2));
}

// ============================================================================
// 6. Unrelated and self-looping data
// ============================================================================

#[test]
fn test_unrelated_match_has_no_label() {
    let text = [
        indi("I1", "Me /Here/", Some("me")),
        indi("I2", "Stranger /There/", Some("15 cM")),
    ]
    .concat();
    assert!(labels(&text).is_empty());
}

#[test]
fn test_cyclic_records_terminate() {
    // I2 is recorded as both parent and child of I3.
    let text = [
        indi("I1", "Me /Loop/", Some("me")),
        indi("I2", "Odd /Loop/", Some("600 cM")),
        indi("I3", "Odder /Loop/", None),
        fam("F1", Some("I3"), None, &["I1", "I2"]),
        fam("F2", Some("I2"), None, &["I3"]),
    ]
    .concat();
    let labels = labels(&text);
    assert_eq!(label_of(&labels, "I2"), "grandparent");
}
