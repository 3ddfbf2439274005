//! Person in the family graph.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use super::FamilyId;

/// Source identifier of a person (the GEDCOM xref without `@`, e.g. `I12`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Parse a GEDCOM `SEX` value. Anything but `M`/`F` is unknown.
    pub fn from_gedcom(value: &str) -> Self {
        match value.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') => Sex::Male,
            Some('F') => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn gedcom_code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

/// A person's name as recorded, plus the parts needed for short names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// The raw name value, surname still wrapped in slashes.
    pub raw: String,
    pub given: Option<String>,
    pub surname: Option<String>,
}

impl PersonName {
    /// Split a GEDCOM `NAME` value such as `John Henry /Smith/ Jr`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut parts = raw.splitn(3, '/');
        let given = parts.next().map(str::trim).filter(|s| !s.is_empty());
        let surname = parts.next().map(str::trim).filter(|s| !s.is_empty());
        Self {
            raw: raw.to_string(),
            given: given.map(str::to_string),
            surname: surname.map(str::to_string),
        }
    }

    /// Full display name with the surname slashes removed.
    pub fn full(&self) -> String {
        self.raw
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First given name and surname only. Falls back to [`full`](Self::full).
    pub fn short(&self) -> String {
        let first = self
            .given
            .as_deref()
            .and_then(|g| g.split_whitespace().next());
        let short = [first, self.surname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if short.is_empty() { self.full() } else { short }
    }

    /// `[?]`-style placeholders and empty names render as "unknown".
    pub fn is_placeholder(&self) -> bool {
        let full = self.full();
        full.is_empty() || (full.contains('?') && full.contains('[') && full.contains(']'))
    }
}

/// A person in the family graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub sex: Sex,
    pub name: PersonName,
    /// Raw birth date text, if recorded.
    pub birth: Option<String>,
    /// Raw death date text, if recorded.
    pub death: Option<String>,
    /// Families where this person is a child, in source order.
    pub child_of: Vec<FamilyId>,
    /// Families where this person is a partner, in source order.
    pub spouse_of: Vec<FamilyId>,
    /// More than one family-as-spouse link. Only used for rendering emphasis.
    pub multi_family: bool,
}

impl Person {
    pub fn new(id: PersonId) -> Self {
        Self {
            id,
            sex: Sex::Unknown,
            name: PersonName::default(),
            birth: None,
            death: None,
            child_of: Vec::new(),
            spouse_of: Vec::new(),
            multi_family: false,
        }
    }

    pub fn with_name(mut self, raw: &str) -> Self {
        self.name = PersonName::parse(raw);
        self
    }

    /// Name for display, honouring the short-name option.
    pub fn display_name(&self, short: bool) -> String {
        if self.name.is_placeholder() {
            return "unknown".to_string();
        }
        if short { self.name.short() } else { self.name.full() }
    }
}
