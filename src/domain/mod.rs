//! Pure record models for categories, people, transactions and report rows.
//! No I/O and no shell concerns; only data types, enums and the field
//! accessors the listing engine filters on.

pub mod category;
pub mod common;
pub mod person;
pub mod report;
pub mod transaction;

pub use category::{Category, CategoryField, CategoryRequest, Purpose};
pub use common::{Displayable, EntityKind, Identifiable, NamedEntity, RecordId};
pub use person::{Person, PersonField, PersonRequest};
pub use report::{OverallTotals, ReportField, ReportRow};
pub use transaction::{Transaction, TransactionField, TransactionKind, TransactionRequest};
