//! Category list bindings.

use crate::api::{ApiResult, FinanceApi};
use crate::domain::{Category, CategoryRequest, EntityKind, RecordId};
use crate::listing::{CategoryCriteria, ListView};

use super::{RecordService, Resource};

pub type CategoryService = RecordService<Category>;

impl Resource for Category {
    type Request = CategoryRequest;

    const ENTITY: EntityKind = EntityKind::Category;

    fn fetch_all(api: &dyn FinanceApi) -> ApiResult<Vec<Self>> {
        api.categories()
    }

    fn create(api: &mut dyn FinanceApi, request: CategoryRequest) -> ApiResult<Self> {
        api.create_category(request)
    }

    fn update(api: &mut dyn FinanceApi, id: RecordId, request: CategoryRequest) -> ApiResult<Self> {
        api.update_category(id, request)
    }

    fn delete(api: &mut dyn FinanceApi, id: RecordId) -> ApiResult<()> {
        api.delete_category(id)
    }
}

impl RecordService<Category> {
    pub fn apply_criteria(view: &mut ListView<Category>, criteria: &CategoryCriteria) -> bool {
        view.set_filters(criteria.to_filter_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use crate::core::services::ServiceError;
    use crate::domain::{PersonRequest, Purpose, TransactionKind, TransactionRequest};

    #[test]
    fn create_refreshes_the_view() {
        let mut api = MemoryApi::new();
        let mut view = CategoryService::load(&api).expect("load");
        assert!(view.records().is_empty());

        CategoryService::create(
            &mut api,
            &mut view,
            CategoryRequest::new("Rent", Purpose::Expense),
        )
        .expect("create");
        assert_eq!(view.records().len(), 1);
        assert_eq!(
            CategoryService::find(&view, 1).map(|c| c.description.as_str()),
            Some("Rent")
        );
    }

    #[test]
    fn linked_category_delete_reports_friendly_message() {
        let mut api = MemoryApi::new();
        let mut view = CategoryService::load(&api).expect("load");
        CategoryService::create(&mut api, &mut view, CategoryRequest::new("Food", Purpose::Both))
            .expect("category");
        api.create_person(PersonRequest::new("Ana", 30)).expect("person");
        api.create_transaction(TransactionRequest {
            description: "Lunch".into(),
            amount: 25.0,
            kind: TransactionKind::Expense,
            category_id: 1,
            person_id: 1,
        })
        .expect("transaction");

        let err = CategoryService::delete(&mut api, &mut view, 1).expect_err("conflict");
        assert!(matches!(err, ServiceError::Api(_)));
        assert_eq!(
            err.user_message(),
            "Cannot delete this category because it has linked transactions."
        );
        assert_eq!(view.records().len(), 1);
    }
}
