//! Person list bindings, including the age filter mode switch.

use crate::api::{ApiResult, FinanceApi};
use crate::domain::{EntityKind, Person, PersonRequest, RecordId};
use crate::listing::{AgeFilterMode, ListView, PersonCriteria};

use super::{RecordService, Resource};

pub type PersonService = RecordService<Person>;

impl Resource for Person {
    type Request = PersonRequest;

    const ENTITY: EntityKind = EntityKind::Person;

    fn fetch_all(api: &dyn FinanceApi) -> ApiResult<Vec<Self>> {
        api.people()
    }

    fn create(api: &mut dyn FinanceApi, request: PersonRequest) -> ApiResult<Self> {
        api.create_person(request)
    }

    fn update(api: &mut dyn FinanceApi, id: RecordId, request: PersonRequest) -> ApiResult<Self> {
        api.update_person(id, request)
    }

    fn delete(api: &mut dyn FinanceApi, id: RecordId) -> ApiResult<()> {
        api.delete_person(id)
    }
}

impl RecordService<Person> {
    pub fn apply_criteria(view: &mut ListView<Person>, criteria: &PersonCriteria) -> bool {
        view.set_filters(criteria.to_filter_set())
    }

    /// Switches the age filter mode, clearing every age value.
    pub fn switch_age_mode(
        view: &mut ListView<Person>,
        criteria: &mut PersonCriteria,
        mode: AgeFilterMode,
    ) -> bool {
        criteria.age.set_mode(mode);
        Self::apply_criteria(view, criteria)
    }
}
