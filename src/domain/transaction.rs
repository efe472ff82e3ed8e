//! Transactions move money in or out on behalf of a person.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::listing::{FieldValue, Filterable};

/// A transaction as served by the record source, with the names of its
/// person and category resolved alongside the foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: RecordId,
    #[serde(default)]
    pub category_name: String,
    pub person_id: RecordId,
    #[serde(default)]
    pub person_name: String,
}

impl Identifiable for Transaction {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{}] {:.2}", self.description, self.kind, self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionField {
    Description,
    Kind,
    Person,
    Category,
    Amount,
}

impl Filterable for Transaction {
    type Field = TransactionField;

    fn field(&self, field: TransactionField) -> FieldValue<'_> {
        match field {
            TransactionField::Description => FieldValue::Text(&self.description),
            TransactionField::Kind => FieldValue::Id(self.kind.code()),
            TransactionField::Person => FieldValue::Id(self.person_id),
            TransactionField::Category => FieldValue::Id(self.category_id),
            TransactionField::Amount => FieldValue::Number(self.amount),
        }
    }
}

/// Payload for creating or replacing a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: RecordId,
    pub person_id: RecordId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Expense, TransactionKind::Income];

    pub fn code(self) -> RecordId {
        match self {
            TransactionKind::Expense => 1,
            TransactionKind::Income => 2,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "expense" | "despesa" | "1" => Ok(TransactionKind::Expense),
            "income" | "receita" | "2" => Ok(TransactionKind::Income),
            other => Err(format!(
                "unknown transaction kind `{other}` (expected expense or income)"
            )),
        }
    }
}
