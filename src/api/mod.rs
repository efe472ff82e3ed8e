//! Record source contract. Every list view fetches complete record sets
//! through [`FinanceApi`]; filtering and paging never happen at the source.

pub mod memory;

use std::fmt;

use thiserror::Error;

use crate::domain::{
    Category, CategoryRequest, EntityKind, Person, PersonRequest, RecordId, Transaction,
    TransactionRequest,
};
use crate::errors::FinanceError;

pub use memory::MemoryApi;

pub type ApiResult<T> = Result<T, ApiError>;

/// Machine-readable reason attached to a refused mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCode {
    /// The record is still referenced by transactions.
    LinkedTransactions,
}

impl fmt::Display for ConflictCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictCode::LinkedTransactions => f.write_str("linked transactions exist"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: RecordId },
    #[error("{entity} {id} cannot be changed: {code}")]
    Conflict {
        entity: EntityKind,
        id: RecordId,
        code: ConflictCode,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn conflict_code(&self) -> Option<ConflictCode> {
        match self {
            ApiError::Conflict { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Request/response operations offered by the finance record source.
pub trait FinanceApi {
    fn categories(&self) -> ApiResult<Vec<Category>>;
    fn category(&self, id: RecordId) -> ApiResult<Category>;
    fn create_category(&mut self, request: CategoryRequest) -> ApiResult<Category>;
    fn update_category(&mut self, id: RecordId, request: CategoryRequest) -> ApiResult<Category>;
    fn delete_category(&mut self, id: RecordId) -> ApiResult<()>;

    fn people(&self) -> ApiResult<Vec<Person>>;
    fn person(&self, id: RecordId) -> ApiResult<Person>;
    fn create_person(&mut self, request: PersonRequest) -> ApiResult<Person>;
    fn update_person(&mut self, id: RecordId, request: PersonRequest) -> ApiResult<Person>;
    fn delete_person(&mut self, id: RecordId) -> ApiResult<()>;

    fn transactions(&self) -> ApiResult<Vec<Transaction>>;
    fn transaction(&self, id: RecordId) -> ApiResult<Transaction>;
    fn create_transaction(&mut self, request: TransactionRequest) -> ApiResult<Transaction>;
    fn update_transaction(
        &mut self,
        id: RecordId,
        request: TransactionRequest,
    ) -> ApiResult<Transaction>;
    fn delete_transaction(&mut self, id: RecordId) -> ApiResult<()>;
}
