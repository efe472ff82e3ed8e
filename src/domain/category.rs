//! Categories group transactions by purpose.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::domain::transaction::TransactionKind;
use crate::listing::{FieldValue, Filterable};

/// A spending or earning category as served by the record source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub description: String,
    pub purpose: Purpose,
}

impl Category {
    pub fn new(id: RecordId, description: impl Into<String>, purpose: Purpose) -> Self {
        Self {
            id,
            description: description.into(),
            purpose,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.description
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.description, self.purpose)
    }
}

/// Filterable columns of the category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryField {
    Description,
    Purpose,
}

impl Filterable for Category {
    type Field = CategoryField;

    fn field(&self, field: CategoryField) -> FieldValue<'_> {
        match field {
            CategoryField::Description => FieldValue::Text(&self.description),
            CategoryField::Purpose => FieldValue::Id(self.purpose.code()),
        }
    }
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub description: String,
    pub purpose: Purpose,
}

impl CategoryRequest {
    pub fn new(description: impl Into<String>, purpose: Purpose) -> Self {
        Self {
            description: description.into(),
            purpose,
        }
    }
}

/// Which transaction kinds a category may be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    #[default]
    Expense,
    Income,
    Both,
}

impl Purpose {
    pub const ALL: [Purpose; 3] = [Purpose::Expense, Purpose::Income, Purpose::Both];

    /// Stable numeric code used for categorical filtering.
    pub fn code(self) -> RecordId {
        match self {
            Purpose::Expense => 1,
            Purpose::Income => 2,
            Purpose::Both => 3,
        }
    }

    /// Returns `true` when a transaction of `kind` may use this category.
    pub fn accepts(self, kind: TransactionKind) -> bool {
        match self {
            Purpose::Both => true,
            Purpose::Expense => kind == TransactionKind::Expense,
            Purpose::Income => kind == TransactionKind::Income,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Purpose::Expense => "Expense",
            Purpose::Income => "Income",
            Purpose::Both => "Both",
        };
        f.write_str(label)
    }
}

impl FromStr for Purpose {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "expense" | "despesa" | "1" => Ok(Purpose::Expense),
            "income" | "receita" | "2" => Ok(Purpose::Income),
            "both" | "ambas" | "3" => Ok(Purpose::Both),
            other => Err(format!(
                "unknown purpose `{other}` (expected expense, income or both)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_parses_english_and_portuguese_labels() {
        assert_eq!("Receita".parse::<Purpose>(), Ok(Purpose::Income));
        assert_eq!("both".parse::<Purpose>(), Ok(Purpose::Both));
        assert!("weekly".parse::<Purpose>().is_err());
    }

    #[test]
    fn both_purpose_accepts_every_kind() {
        assert!(Purpose::Both.accepts(TransactionKind::Expense));
        assert!(Purpose::Both.accepts(TransactionKind::Income));
        assert!(!Purpose::Expense.accepts(TransactionKind::Income));
    }

    #[test]
    fn category_serializes_camel_case() {
        let category = Category::new(4, "Groceries", Purpose::Expense);
        let json = serde_json::to_value(&category).expect("serialize");
        assert_eq!(json["description"], "Groceries");
        assert_eq!(json["purpose"], "expense");
    }
}
