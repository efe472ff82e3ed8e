//! People own transactions.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::listing::{FieldValue, Filterable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(id: RecordId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

impl Identifiable for Person {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl NamedEntity for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Person {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonField {
    Name,
    Age,
}

impl Filterable for Person {
    type Field = PersonField;

    fn field(&self, field: PersonField) -> FieldValue<'_> {
        match field {
            PersonField::Name => FieldValue::Text(&self.name),
            PersonField::Age => FieldValue::Number(f64::from(self.age)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    pub name: String,
    pub age: u32,
}

impl PersonRequest {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}
