//! Transaction list bindings.

use crate::api::{ApiResult, FinanceApi};
use crate::domain::{EntityKind, RecordId, Transaction, TransactionRequest};
use crate::listing::{ListView, TransactionCriteria};

use super::{RecordService, Resource};

pub type TransactionService = RecordService<Transaction>;

impl Resource for Transaction {
    type Request = TransactionRequest;

    const ENTITY: EntityKind = EntityKind::Transaction;

    fn fetch_all(api: &dyn FinanceApi) -> ApiResult<Vec<Self>> {
        api.transactions()
    }

    fn create(api: &mut dyn FinanceApi, request: TransactionRequest) -> ApiResult<Self> {
        api.create_transaction(request)
    }

    fn update(
        api: &mut dyn FinanceApi,
        id: RecordId,
        request: TransactionRequest,
    ) -> ApiResult<Self> {
        api.update_transaction(id, request)
    }

    fn delete(api: &mut dyn FinanceApi, id: RecordId) -> ApiResult<()> {
        api.delete_transaction(id)
    }
}

impl RecordService<Transaction> {
    pub fn apply_criteria(
        view: &mut ListView<Transaction>,
        criteria: &TransactionCriteria,
    ) -> bool {
        view.set_filters(criteria.to_filter_set())
    }
}
