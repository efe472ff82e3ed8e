//! Filter form values for each record type and their conversion into
//! [`FilterSet`]s.

use std::{fmt, str::FromStr};

use crate::domain::{
    CategoryField, PersonField, Purpose, RecordId, TransactionField, TransactionKind,
};

use super::filter::{FilterSet, Predicate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCriteria {
    pub description: String,
    pub purpose: Option<Purpose>,
}

impl CategoryCriteria {
    pub fn to_filter_set(&self) -> FilterSet<CategoryField> {
        FilterSet::new()
            .with(
                CategoryField::Description,
                Predicate::text(self.description.clone()),
            )
            .with(
                CategoryField::Purpose,
                Predicate::category(self.purpose.map(Purpose::code)),
            )
    }
}

/// Selects how the age filter is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeFilterMode {
    #[default]
    Exact,
    Range,
}

impl fmt::Display for AgeFilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeFilterMode::Exact => f.write_str("exact"),
            AgeFilterMode::Range => f.write_str("range"),
        }
    }
}

impl FromStr for AgeFilterMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "exact" | "exata" => Ok(AgeFilterMode::Exact),
            "range" | "faixa" => Ok(AgeFilterMode::Range),
            other => Err(format!("unknown age mode `{other}` (expected exact or range)")),
        }
    }
}

/// Age filter with two mutually exclusive modes. Only the values of the
/// active mode reach the predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeFilter {
    mode: AgeFilterMode,
    pub exact: Option<u32>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl AgeFilter {
    pub fn exact(age: Option<u32>) -> Self {
        Self {
            exact: age,
            ..Self::default()
        }
    }

    pub fn range(min: Option<u32>, max: Option<u32>) -> Self {
        Self {
            mode: AgeFilterMode::Range,
            exact: None,
            min,
            max,
        }
    }

    pub fn mode(&self) -> AgeFilterMode {
        self.mode
    }

    /// Switches mode and clears every age value.
    pub fn set_mode(&mut self, mode: AgeFilterMode) {
        *self = Self {
            mode,
            ..Self::default()
        };
    }

    pub fn predicate(&self) -> Predicate {
        match self.mode {
            AgeFilterMode::Exact => Predicate::equals(self.exact.map(f64::from)),
            AgeFilterMode::Range => {
                Predicate::range(self.min.map(f64::from), self.max.map(f64::from))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonCriteria {
    pub name: String,
    pub age: AgeFilter,
}

impl PersonCriteria {
    pub fn to_filter_set(&self) -> FilterSet<PersonField> {
        FilterSet::new()
            .with(PersonField::Name, Predicate::text(self.name.clone()))
            .with(PersonField::Age, self.age.predicate())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionCriteria {
    pub description: String,
    pub kind: Option<TransactionKind>,
    pub person_id: Option<RecordId>,
    pub category_id: Option<RecordId>,
}

impl TransactionCriteria {
    pub fn to_filter_set(&self) -> FilterSet<TransactionField> {
        FilterSet::new()
            .with(
                TransactionField::Description,
                Predicate::text(self.description.clone()),
            )
            .with(
                TransactionField::Kind,
                Predicate::category(self.kind.map(TransactionKind::code)),
            )
            .with(TransactionField::Person, Predicate::category(self.person_id))
            .with(
                TransactionField::Category,
                Predicate::category(self.category_id),
            )
    }
}
