//! Field predicates and the stable record filter.
//!
//! Records expose their filterable columns through [`Filterable`]; a
//! [`FilterSet`] maps each column to at most one [`Predicate`]. Predicates are
//! ANDed and an inactive predicate (empty query, unset value) always passes.

use std::{collections::BTreeMap, fmt};

use crate::domain::RecordId;

/// Borrowed view of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Id(RecordId),
}

/// Implemented by records that can be narrowed by a [`FilterSet`].
pub trait Filterable {
    /// Enumerates the filterable columns of the record.
    type Field: Copy + Ord + fmt::Debug;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

impl<T: Filterable + ?Sized> Filterable for &T {
    type Field = T::Field;

    fn field(&self, field: T::Field) -> FieldValue<'_> {
        (**self).field(field)
    }
}

/// A single filter condition applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring test.
    TextContains(String),
    NumberEquals(Option<f64>),
    /// Inclusive on both ends.
    NumberRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Equality against a foreign-key id or enum code; `None` means "all".
    CategoricalEquals(Option<RecordId>),
}

impl Predicate {
    pub fn text(query: impl Into<String>) -> Self {
        Predicate::TextContains(query.into())
    }

    pub fn equals(value: Option<f64>) -> Self {
        Predicate::NumberEquals(value)
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Predicate::NumberRange { min, max }
    }

    pub fn category(id: Option<RecordId>) -> Self {
        Predicate::CategoricalEquals(id)
    }

    /// Returns `false` when the predicate would pass every value.
    pub fn is_active(&self) -> bool {
        match self {
            Predicate::TextContains(query) => !query.is_empty(),
            Predicate::NumberEquals(value) => value.is_some(),
            Predicate::NumberRange { min, max } => min.is_some() || max.is_some(),
            Predicate::CategoricalEquals(id) => id.is_some(),
        }
    }

    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        Matcher::compile(self).matches(value)
    }
}

/// Predicate prepared for repeated evaluation; text queries are lowercased once.
enum Matcher {
    Always,
    Contains(String),
    Equals(f64),
    Between(Option<f64>, Option<f64>),
    Id(RecordId),
}

impl Matcher {
    fn compile(predicate: &Predicate) -> Self {
        if !predicate.is_active() {
            return Matcher::Always;
        }
        match predicate {
            Predicate::TextContains(query) => Matcher::Contains(query.to_lowercase()),
            Predicate::NumberEquals(Some(value)) => Matcher::Equals(*value),
            Predicate::NumberRange { min, max } => Matcher::Between(*min, *max),
            Predicate::CategoricalEquals(Some(id)) => Matcher::Id(*id),
            Predicate::NumberEquals(None) | Predicate::CategoricalEquals(None) => Matcher::Always,
        }
    }

    fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Matcher::Always, _) => true,
            (Matcher::Contains(query), FieldValue::Text(text)) => {
                text.to_lowercase().contains(query.as_str())
            }
            (Matcher::Equals(expected), FieldValue::Number(actual)) => actual == *expected,
            (Matcher::Between(min, max), FieldValue::Number(actual)) => {
                min.map_or(true, |min| actual >= min) && max.map_or(true, |max| actual <= max)
            }
            (Matcher::Id(expected), FieldValue::Id(actual)) => actual == *expected,
            // A predicate of the wrong kind for the field never matches.
            _ => false,
        }
    }
}

/// Active predicates keyed by field. Inactive predicates are never stored, so
/// two sets compare equal exactly when they filter the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet<F: Ord> {
    predicates: BTreeMap<F, Predicate>,
}

impl<F: Ord> Default for FilterSet<F> {
    fn default() -> Self {
        Self {
            predicates: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy + fmt::Debug> FilterSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: F, predicate: Predicate) -> Self {
        self.set(field, predicate);
        self
    }

    /// Sets the predicate for `field`, returning `true` when the effective
    /// filter changed.
    pub fn set(&mut self, field: F, predicate: Predicate) -> bool {
        if !predicate.is_active() {
            return self.predicates.remove(&field).is_some();
        }
        if self.predicates.get(&field) == Some(&predicate) {
            return false;
        }
        self.predicates.insert(field, predicate);
        true
    }

    pub fn remove(&mut self, field: F) -> bool {
        self.predicates.remove(&field).is_some()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.predicates.is_empty();
        self.predicates.clear();
        changed
    }

    pub fn get(&self, field: F) -> Option<&Predicate> {
        self.predicates.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &Predicate)> + '_ {
        self.predicates.iter().map(|(field, predicate)| (*field, predicate))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Filterable<Field = F> + ?Sized,
    {
        let compiled = self.compile();
        matches_all(&compiled, record)
    }

    fn compile(&self) -> Vec<(F, Matcher)> {
        self.predicates
            .iter()
            .map(|(field, predicate)| (*field, Matcher::compile(predicate)))
            .collect()
    }
}

fn matches_all<T, F>(compiled: &[(F, Matcher)], record: &T) -> bool
where
    T: Filterable<Field = F> + ?Sized,
    F: Copy,
{
    compiled
        .iter()
        .all(|(field, matcher)| matcher.matches(record.field(*field)))
}

/// Returns the records that pass every predicate in `filters`, in input order.
pub fn filter_records<'a, T: Filterable>(
    records: &'a [T],
    filters: &FilterSet<T::Field>,
) -> Vec<&'a T> {
    let compiled = filters.compile();
    records
        .iter()
        .filter(|record| matches_all(&compiled, *record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, PersonField, Transaction, TransactionField, TransactionKind};

    fn people() -> Vec<Person> {
        vec![
            Person::new(1, "Ana Souza", 17),
            Person::new(2, "Bruno Lima", 30),
            Person::new(3, "ana paula", 45),
            Person::new(4, "Carlos", 65),
            Person::new(5, "Daniela", 70),
        ]
    }

    fn transaction(
        id: i64,
        description: &str,
        kind: TransactionKind,
        person: i64,
        category: i64,
    ) -> Transaction {
        Transaction {
            id,
            description: description.into(),
            amount: 10.0 * id as f64,
            kind,
            category_id: category,
            category_name: String::new(),
            person_id: person,
            person_name: String::new(),
        }
    }

    fn ids<T: crate::domain::Identifiable>(records: &[&T]) -> Vec<i64> {
        records.iter().map(|record| record.id()).collect()
    }

    #[test]
    fn empty_filter_set_returns_everything_in_order() {
        let records = people();
        let filtered = filter_records(&records, &FilterSet::new());
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn text_contains_is_case_insensitive() {
        let records = people();
        let filters = FilterSet::new().with(PersonField::Name, Predicate::text("ANA"));
        assert_eq!(ids(&filter_records(&records, &filters)), vec![1, 3]);
    }

    #[test]
    fn text_contains_handles_non_ascii_case() {
        let records = vec![Person::new(1, "JOÃO", 20), Person::new(2, "Maria", 21)];
        let filters = FilterSet::new().with(PersonField::Name, Predicate::text("joão"));
        assert_eq!(ids(&filter_records(&records, &filters)), vec![1]);
    }

    #[test]
    fn number_range_is_inclusive_and_open_ended() {
        let records = people();
        let bounded =
            FilterSet::new().with(PersonField::Age, Predicate::range(Some(18.0), Some(65.0)));
        assert_eq!(ids(&filter_records(&records, &bounded)), vec![2, 3, 4]);

        let lower_only = FilterSet::new().with(PersonField::Age, Predicate::range(Some(45.0), None));
        assert_eq!(ids(&filter_records(&records, &lower_only)), vec![3, 4, 5]);
    }

    #[test]
    fn number_equals_is_strict() {
        let records = people();
        let filters = FilterSet::new().with(PersonField::Age, Predicate::equals(Some(30.0)));
        assert_eq!(ids(&filter_records(&records, &filters)), vec![2]);
    }

    #[test]
    fn inactive_predicates_are_not_stored() {
        let mut filters = FilterSet::new();
        assert!(!filters.set(PersonField::Name, Predicate::text("")));
        assert!(!filters.set(PersonField::Age, Predicate::range(None, None)));
        assert!(filters.is_empty());

        assert!(filters.set(PersonField::Name, Predicate::text("ana")));
        assert!(!filters.set(PersonField::Name, Predicate::text("ana")));
        assert!(filters.set(PersonField::Name, Predicate::text("")));
        assert!(filters.is_empty());
    }

    #[test]
    fn transaction_predicates_are_anded() {
        let records = vec![
            transaction(1, "Supermarket", TransactionKind::Expense, 1, 10),
            transaction(2, "Salary", TransactionKind::Income, 1, 20),
            transaction(3, "Super snacks", TransactionKind::Expense, 2, 10),
            transaction(4, "Supermarket", TransactionKind::Expense, 1, 11),
        ];
        let filters = FilterSet::new()
            .with(TransactionField::Description, Predicate::text("super"))
            .with(
                TransactionField::Kind,
                Predicate::category(Some(TransactionKind::Expense.code())),
            )
            .with(TransactionField::Person, Predicate::category(Some(1)))
            .with(TransactionField::Category, Predicate::category(Some(10)));
        assert_eq!(ids(&filter_records(&records, &filters)), vec![1]);
    }

    #[test]
    fn mismatched_predicate_kind_never_matches() {
        let records = people();
        let filters = FilterSet::new().with(PersonField::Name, Predicate::equals(Some(30.0)));
        assert!(filter_records(&records, &filters).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = people();
        let filters = FilterSet::new()
            .with(PersonField::Name, Predicate::text("a"))
            .with(PersonField::Age, Predicate::range(Some(20.0), None));
        let once = filter_records(&records, &filters);
        let twice = filter_records(&once, &filters);
        let twice_ids: Vec<i64> = twice.iter().map(|record| record.id).collect();
        assert_eq!(ids(&once), twice_ids);
    }

    #[test]
    fn set_matches_single_record() {
        let filters = FilterSet::new().with(PersonField::Age, Predicate::range(None, Some(18.0)));
        assert!(filters.matches(&Person::new(1, "Teen", 17)));
        assert!(!filters.matches(&Person::new(2, "Adult", 40)));
    }
}
