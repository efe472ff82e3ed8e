//! Shared traits and identifiers for finance records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer identifier assigned by the record source.
pub type RecordId = i64;

/// Exposes the source-assigned identifier of a record.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Provides read-only access to a record's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts a record into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Names the record collections exposed by the record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Category,
    Person,
    Transaction,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Person => "person",
            EntityKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
