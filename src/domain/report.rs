//! Derived report rows. These are computed client-side from the transaction
//! list rather than stored.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::listing::{FieldValue, Filterable};

/// Totals for a single person or category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: RecordId,
    pub name: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl ReportRow {
    pub fn empty(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_income: 0.0,
            total_expense: 0.0,
            balance: 0.0,
        }
    }
}

impl Identifiable for ReportRow {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for ReportRow {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportField {
    Name,
}

impl Filterable for ReportRow {
    type Field = ReportField;

    fn field(&self, field: ReportField) -> FieldValue<'_> {
        match field {
            ReportField::Name => FieldValue::Text(&self.name),
        }
    }
}

/// Grand totals across every transaction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}
