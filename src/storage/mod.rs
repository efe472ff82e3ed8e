//! On-disk persistence of the record set.

pub mod json_backend;

pub use json_backend::{FinanceSnapshot, JsonSnapshotStore};
