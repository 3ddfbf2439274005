//! DNA match annotation.

use serde::{Deserialize, Serialize};
use super::PersonId;

/// A person flagged by the configured DNA event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaMatch {
    pub person: PersonId,
    /// Shared centimorgans, rounded. `None` when the text held no usable number.
    pub cm: Option<u32>,
    /// The event text the value was read from.
    pub text: String,
}

impl DnaMatch {
    /// Value as shown in charts, e.g. `290 cM`.
    pub fn cm_label(&self) -> Option<String> {
        self.cm.map(|cm| format!("{cm} cM"))
    }
}
