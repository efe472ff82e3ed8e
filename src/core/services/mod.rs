//! Services binding record lists to the record source.

pub mod category_service;
pub mod person_service;
pub mod report_service;
pub mod transaction_service;

use std::marker::PhantomData;

use tracing::info;

use crate::api::{ApiError, ApiResult, ConflictCode, FinanceApi};
use crate::domain::{EntityKind, Identifiable, RecordId};
use crate::listing::{Filterable, ListView};

pub use category_service::CategoryService;
pub use person_service::PersonService;
pub use report_service::{Report, ReportKind, ReportService};
pub use transaction_service::TransactionService;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Invalid(String),
}

impl ServiceError {
    /// Message suitable for showing to the user after a failed action.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Api(ApiError::Conflict {
                entity,
                code: ConflictCode::LinkedTransactions,
                ..
            }) => format!("Cannot delete this {entity} because it has linked transactions."),
            ServiceError::Api(ApiError::NotFound { entity, id }) => {
                format!("No {entity} with id {id}.")
            }
            ServiceError::Api(ApiError::Validation(message)) | ServiceError::Invalid(message) => {
                message.clone()
            }
            ServiceError::Api(ApiError::Storage(message)) => {
                format!("Could not reach the record store: {message}")
            }
        }
    }
}

/// Binds a record type to its record-source operations.
pub trait Resource: Filterable + Identifiable + Clone {
    type Request;

    const ENTITY: EntityKind;

    fn fetch_all(api: &dyn FinanceApi) -> ApiResult<Vec<Self>>;
    fn create(api: &mut dyn FinanceApi, request: Self::Request) -> ApiResult<Self>;
    fn update(api: &mut dyn FinanceApi, id: RecordId, request: Self::Request) -> ApiResult<Self>;
    fn delete(api: &mut dyn FinanceApi, id: RecordId) -> ApiResult<()>;
}

/// Load/refresh/mutate workflow shared by every list view. Each mutation is
/// followed by a full fetch so the view always holds the source's record set.
pub struct RecordService<R>(PhantomData<R>);

impl<R: Resource> RecordService<R> {
    pub fn load(api: &dyn FinanceApi) -> ServiceResult<ListView<R>> {
        let records = R::fetch_all(api)?;
        info!(entity = %R::ENTITY, count = records.len(), "records loaded");
        Ok(ListView::new(records))
    }

    pub fn refresh(api: &dyn FinanceApi, view: &mut ListView<R>) -> ServiceResult<()> {
        view.replace_records(R::fetch_all(api)?);
        Ok(())
    }

    pub fn create(
        api: &mut dyn FinanceApi,
        view: &mut ListView<R>,
        request: R::Request,
    ) -> ServiceResult<R> {
        let created = R::create(api, request)?;
        Self::refresh(api, view)?;
        Ok(created)
    }

    pub fn update(
        api: &mut dyn FinanceApi,
        view: &mut ListView<R>,
        id: RecordId,
        request: R::Request,
    ) -> ServiceResult<R> {
        let updated = R::update(api, id, request)?;
        Self::refresh(api, view)?;
        Ok(updated)
    }

    pub fn delete(
        api: &mut dyn FinanceApi,
        view: &mut ListView<R>,
        id: RecordId,
    ) -> ServiceResult<()> {
        R::delete(api, id)?;
        Self::refresh(api, view)
    }

    pub fn find(view: &ListView<R>, id: RecordId) -> Option<&R> {
        view.records().iter().find(|record| record.id() == id)
    }
}
