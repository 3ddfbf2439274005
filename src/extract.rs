//! Match & reference extraction.
//!
//! Reads the configured DNA event of every person, finds the single
//! reference person ("me") and parses the shared-cM value of everyone else.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::{Config, EventField, ValueMode};
use crate::gedcom::{EventRecord, RecordSource};
use crate::model::{DnaMatch, PersonId};
use crate::{Error, Result};

/// `1,234.5 cM`: the number must be followed by the unit. A leading `-`
/// disqualifies it.
fn re_cm_with_unit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[^\d.,-])(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d+))?\s*cm(?:$|[\s.,;:])")
            .expect("cM pattern is valid")
    })
}

/// First number anywhere.
fn re_bare_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^\d.,-])(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d+))?")
            .expect("number pattern is valid")
    })
}

/// Parse a shared-cM value, rounding decimals half-up.
///
/// Returns `None` when no number is found in the form the mode requires.
pub fn parse_cm(text: &str, mode: ValueMode) -> Option<u32> {
    let re = match mode {
        ValueMode::Strict => re_cm_with_unit(),
        ValueMode::Lenient => re_bare_number(),
    };
    let caps = re.captures(text)?;
    let whole: u32 = caps[1].replace(',', "").parse().ok()?;
    let round_up = caps
        .get(2)
        .and_then(|frac| frac.as_str().chars().next())
        .is_some_and(|d| d >= '5');
    whole.checked_add(u32::from(round_up))
}

/// `me`, or `me` followed by a space, period or comma, ignoring case.
pub fn is_reference_marker(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    match lower.strip_prefix("me") {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '.', ',']),
        None => false,
    }
}

/// Text of the configured field of an event.
pub fn event_text(event: &EventRecord, field: EventField) -> Option<&str> {
    let text = match field {
        EventField::Note => event.note.as_deref(),
        EventField::Value => event.value.as_deref(),
    };
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Result of scanning every person's DNA event.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub reference: PersonId,
    /// Text of the reference person's event, re-emitted in GEDCOM output.
    pub reference_text: String,
    /// Matches inside the configured range (or without a value), source order.
    pub matches: Vec<DnaMatch>,
    /// Matches dropped by the range filter.
    pub out_of_range: Vec<DnaMatch>,
}

impl Extraction {
    /// Matches whose event text held no usable number.
    pub fn unparsed(&self) -> impl Iterator<Item = &DnaMatch> {
        self.matches.iter().filter(|m| m.cm.is_none())
    }
}

/// Scan all persons of `source` for the configured DNA event.
pub fn extract<S: RecordSource>(source: &S, config: &Config) -> Result<Extraction> {
    let mut found_event = false;
    let mut references: Vec<(PersonId, String)> = Vec::new();
    let mut matches = Vec::new();
    let mut out_of_range = Vec::new();

    for indi in source.individuals() {
        let Some(event) = source.find_event(&indi.id, &config.event_name) else { continue };
        let Some(text) = event_text(event, config.field) else { continue };
        found_event = true;

        if is_reference_marker(text) {
            references.push((indi.id.clone(), text.to_string()));
            continue;
        }

        let cm = parse_cm(text, config.value_mode);
        let dna = DnaMatch { person: indi.id.clone(), cm, text: text.to_string() };
        match cm {
            Some(value) if !config.in_range(value) => {
                debug!(person = %indi.id, cm = value, "match outside cM range");
                out_of_range.push(dna);
            }
            Some(_) => matches.push(dna),
            None => {
                debug!(person = %indi.id, text, "no cM value in DNA event");
                matches.push(dna);
            }
        }
    }

    if !found_event {
        return Err(Error::EventNotFound {
            event: config.event_name.clone(),
            field: config.field,
        });
    }

    let (reference, reference_text) = match references.len() {
        0 => {
            return Err(Error::MissingReferencePerson { event: config.event_name.clone() });
        }
        1 => references.remove(0),
        _ => {
            return Err(Error::AmbiguousReferencePerson {
                ids: references.into_iter().map(|(id, _)| id.0).collect(),
            });
        }
    };

    if matches.is_empty() {
        warn!(reference = %reference, "no DNA matches to draw besides the reference person");
    }
    debug!(
        reference = %reference,
        matches = matches.len(),
        out_of_range = out_of_range.len(),
        "extracted DNA matches"
    );

    Ok(Extraction { reference, reference_text, matches, out_of_range })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom;

    #[test]
    fn test_parse_cm_strict() {
        assert_eq!(parse_cm("1,234 cM", ValueMode::Strict), Some(1234));
        assert_eq!(parse_cm("123.7 cM", ValueMode::Strict), Some(124));
        assert_eq!(parse_cm("123.4cm", ValueMode::Strict), Some(123));
        assert_eq!(parse_cm("290 cM across 15 segments", ValueMode::Strict), Some(290));
        assert_eq!(parse_cm("shared 55.5 CM.", ValueMode::Strict), Some(56));
        assert_eq!(parse_cm("text 321 text", ValueMode::Strict), None);
        assert_eq!(parse_cm("321 cMs", ValueMode::Strict), None);
        assert_eq!(parse_cm("", ValueMode::Strict), None);
        assert_eq!(parse_cm("-5 cM", ValueMode::Strict), None);
        assert_eq!(parse_cm("was -5 cM, now 12 cM", ValueMode::Strict), Some(12));
    }

    #[test]
    fn test_parse_cm_lenient() {
        assert_eq!(parse_cm("text 321 text", ValueMode::Lenient), Some(321));
        assert_eq!(parse_cm("1,234.5", ValueMode::Lenient), Some(1235));
        assert_eq!(parse_cm("no digits", ValueMode::Lenient), None);
        assert_eq!(parse_cm("-40", ValueMode::Lenient), None);
    }

    #[test]
    fn test_reference_marker() {
        assert!(is_reference_marker("me"));
        assert!(is_reference_marker("Me, the tester"));
        assert!(is_reference_marker("ME. kit A123"));
        assert!(is_reference_marker("  me "));
        assert!(!is_reference_marker("meredith 20 cM"));
        assert!(!is_reference_marker("me:"));
        assert!(!is_reference_marker("not me"));
    }

    fn doc(events: &[(&str, &str)]) -> gedcom::GedcomDocument {
        let mut text = String::new();
        for (id, note) in events {
            text.push_str(&format!("0 @{id}@ INDI\n1 EVEN\n2 TYPE dnamatch\n2 NOTE {note}\n"));
        }
        text.push_str("0 @I99@ INDI\n1 NAME No /Event/\n");
        gedcom::parse(&text).unwrap()
    }

    #[test]
    fn test_extract_filters_range() {
        let source = doc(&[("I1", "me"), ("I2", "50 cM"), ("I3", "7000 cM"), ("I4", "unknown")]);
        let mut config = Config::new("DNAMatch");
        config.max_cm = 5000;
        let extraction = extract(&source, &config).unwrap();

        assert_eq!(extraction.reference.as_str(), "I1");
        let kept: Vec<&str> = extraction.matches.iter().map(|m| m.person.as_str()).collect();
        assert_eq!(kept, vec!["I2", "I4"]);
        assert_eq!(extraction.out_of_range.len(), 1);
        assert_eq!(extraction.unparsed().count(), 1);
    }

    #[test]
    fn test_missing_and_ambiguous_reference() {
        let config = Config::new("dnamatch");
        let none = doc(&[("I2", "50 cM")]);
        assert!(matches!(extract(&none, &config), Err(Error::MissingReferencePerson { .. })));

        let two = doc(&[("I1", "me"), ("I2", "Me, again")]);
        match extract(&two, &config) {
            Err(Error::AmbiguousReferencePerson { ids }) => assert_eq!(ids, vec!["I1", "I2"]),
            other => panic!("expected ambiguity error, got {other:?}"),
        }
    }

    #[test]
    fn test_event_not_found_in_value_field() {
        let source = doc(&[("I1", "me")]);
        let mut config = Config::new("dnamatch");
        config.field = EventField::Value;
        assert!(matches!(extract(&source, &config), Err(Error::EventNotFound { .. })));
    }
}
