//! Records produced by the GEDCOM reader.
//!
//! These are the collaborator-side shapes: close to the file, no graph
//! invariants enforced. The `graph` module turns them into the arena.

use crate::model::{FamilyId, LinkKind, PersonId, PersonName, Sex};

/// An individual (`INDI`) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: PersonId,
    pub sex: Sex,
    pub name: PersonName,
    pub birth: Option<String>,
    pub death: Option<String>,
    /// `FAMC` links, with the `PEDI` qualifier when present.
    pub child_of: Vec<ChildOf>,
    /// `FAMS` links.
    pub spouse_of: Vec<FamilyId>,
    /// `EVEN` events, in source order.
    pub events: Vec<EventRecord>,
}

impl Individual {
    pub fn new(id: PersonId) -> Self {
        Self {
            id,
            sex: Sex::Unknown,
            name: PersonName::default(),
            birth: None,
            death: None,
            child_of: Vec::new(),
            spouse_of: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The first event whose `TYPE` equals `event_type`, ignoring case.
    pub fn event(&self, event_type: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| {
            e.event_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(event_type.trim()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOf {
    pub family: FamilyId,
    pub pedigree: Option<LinkKind>,
}

/// A custom event (`EVEN`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub event_type: Option<String>,
    /// The `EVEN` line value, continuations folded in.
    pub value: Option<String>,
    /// The `NOTE` text, pointer notes resolved.
    pub note: Option<String>,
}

/// A family (`FAM`) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRecord {
    pub id: FamilyId,
    pub husband: Option<PersonId>,
    pub wife: Option<PersonId>,
    pub children: Vec<ChildRecord>,
}

impl FamilyRecord {
    pub fn new(id: FamilyId) -> Self {
        Self { id, husband: None, wife: None, children: Vec::new() }
    }
}

/// A `CHIL` line with its `_FREL`/`_MREL` qualifiers folded into one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    pub child: PersonId,
    pub kind: Option<LinkKind>,
}
