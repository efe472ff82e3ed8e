//! In-process record source, optionally mirrored to a JSON snapshot file.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::{
    Category, CategoryRequest, EntityKind, Identifiable, Person, PersonRequest, RecordId,
    Transaction, TransactionRequest,
};
use crate::storage::{FinanceSnapshot, JsonSnapshotStore};

use super::{ApiError, ApiResult, ConflictCode, FinanceApi};

#[derive(Debug, Default)]
pub struct MemoryApi {
    snapshot: FinanceSnapshot,
    store: Option<JsonSnapshotStore>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: FinanceSnapshot) -> Self {
        Self {
            snapshot,
            store: None,
        }
    }

    /// Opens a file-backed source; every successful mutation is written back.
    pub fn open(path: impl Into<PathBuf>) -> ApiResult<Self> {
        let store = JsonSnapshotStore::new(path);
        let snapshot = store.load()?;
        Ok(Self {
            snapshot,
            store: Some(store),
        })
    }

    pub fn snapshot(&self) -> &FinanceSnapshot {
        &self.snapshot
    }

    /// Writes `next` to the backing file, then makes it the live snapshot.
    /// A failed write leaves the current snapshot untouched.
    fn commit(&mut self, next: FinanceSnapshot) -> ApiResult<()> {
        if let Some(store) = &self.store {
            store.save(&next)?;
        }
        self.snapshot = next;
        Ok(())
    }

    fn next_id<T: Identifiable>(records: &[T]) -> RecordId {
        records.iter().map(Identifiable::id).max().unwrap_or(0) + 1
    }

    fn find_category(&self, id: RecordId) -> ApiResult<&Category> {
        self.snapshot
            .categories
            .iter()
            .find(|category| category.id == id)
            .ok_or(ApiError::NotFound {
                entity: EntityKind::Category,
                id,
            })
    }

    fn find_person(&self, id: RecordId) -> ApiResult<&Person> {
        self.snapshot
            .people
            .iter()
            .find(|person| person.id == id)
            .ok_or(ApiError::NotFound {
                entity: EntityKind::Person,
                id,
            })
    }

    fn resolve_names(&self, mut transaction: Transaction) -> Transaction {
        if let Ok(category) = self.find_category(transaction.category_id) {
            transaction.category_name = category.description.clone();
        }
        if let Ok(person) = self.find_person(transaction.person_id) {
            transaction.person_name = person.name.clone();
        }
        transaction
    }

    fn has_linked_transactions(&self, entity: EntityKind, id: RecordId) -> bool {
        self.snapshot.transactions.iter().any(|txn| match entity {
            EntityKind::Category => txn.category_id == id,
            EntityKind::Person => txn.person_id == id,
            EntityKind::Transaction => false,
        })
    }

    fn ensure_unlinked(&self, entity: EntityKind, id: RecordId) -> ApiResult<()> {
        if self.has_linked_transactions(entity, id) {
            warn!(%entity, id, "delete refused, linked transactions exist");
            return Err(ApiError::Conflict {
                entity,
                id,
                code: ConflictCode::LinkedTransactions,
            });
        }
        Ok(())
    }

    fn build_transaction(
        &self,
        id: RecordId,
        request: TransactionRequest,
    ) -> ApiResult<Transaction> {
        let description = required_text(&request.description, "description")?;
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(ApiError::Validation(
                "amount must be a positive number".into(),
            ));
        }
        let category = self.find_category(request.category_id)?;
        if !category.purpose.accepts(request.kind) {
            return Err(ApiError::Validation(format!(
                "category `{}` does not accept {} transactions",
                category.description, request.kind
            )));
        }
        let person = self.find_person(request.person_id)?;
        Ok(Transaction {
            id,
            description,
            amount: request.amount,
            kind: request.kind,
            category_id: category.id,
            category_name: category.description.clone(),
            person_id: person.id,
            person_name: person.name.clone(),
        })
    }
}

fn required_text(value: &str, field: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn replace_by_id<T: Identifiable>(records: &mut [T], record: T) -> bool {
    match records.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: Identifiable>(records: &mut Vec<T>, id: RecordId) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

impl FinanceApi for MemoryApi {
    fn categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.snapshot.categories.clone())
    }

    fn category(&self, id: RecordId) -> ApiResult<Category> {
        self.find_category(id).cloned()
    }

    fn create_category(&mut self, request: CategoryRequest) -> ApiResult<Category> {
        let description = required_text(&request.description, "description")?;
        let category = Category::new(
            Self::next_id(&self.snapshot.categories),
            description,
            request.purpose,
        );
        let mut next = self.snapshot.clone();
        next.categories.push(category.clone());
        self.commit(next)?;
        info!(id = category.id, "category created");
        Ok(category)
    }

    fn update_category(&mut self, id: RecordId, request: CategoryRequest) -> ApiResult<Category> {
        let description = required_text(&request.description, "description")?;
        let category = Category::new(id, description, request.purpose);
        let mut next = self.snapshot.clone();
        if !replace_by_id(&mut next.categories, category.clone()) {
            return Err(ApiError::NotFound {
                entity: EntityKind::Category,
                id,
            });
        }
        self.commit(next)?;
        info!(id, "category updated");
        Ok(category)
    }

    fn delete_category(&mut self, id: RecordId) -> ApiResult<()> {
        self.find_category(id)?;
        self.ensure_unlinked(EntityKind::Category, id)?;
        let mut next = self.snapshot.clone();
        remove_by_id(&mut next.categories, id);
        self.commit(next)?;
        info!(id, "category deleted");
        Ok(())
    }

    fn people(&self) -> ApiResult<Vec<Person>> {
        Ok(self.snapshot.people.clone())
    }

    fn person(&self, id: RecordId) -> ApiResult<Person> {
        self.find_person(id).cloned()
    }

    fn create_person(&mut self, request: PersonRequest) -> ApiResult<Person> {
        let name = required_text(&request.name, "name")?;
        let person = Person::new(Self::next_id(&self.snapshot.people), name, request.age);
        let mut next = self.snapshot.clone();
        next.people.push(person.clone());
        self.commit(next)?;
        info!(id = person.id, "person created");
        Ok(person)
    }

    fn update_person(&mut self, id: RecordId, request: PersonRequest) -> ApiResult<Person> {
        let name = required_text(&request.name, "name")?;
        let person = Person::new(id, name, request.age);
        let mut next = self.snapshot.clone();
        if !replace_by_id(&mut next.people, person.clone()) {
            return Err(ApiError::NotFound {
                entity: EntityKind::Person,
                id,
            });
        }
        self.commit(next)?;
        info!(id, "person updated");
        Ok(person)
    }

    fn delete_person(&mut self, id: RecordId) -> ApiResult<()> {
        self.find_person(id)?;
        self.ensure_unlinked(EntityKind::Person, id)?;
        let mut next = self.snapshot.clone();
        remove_by_id(&mut next.people, id);
        self.commit(next)?;
        info!(id, "person deleted");
        Ok(())
    }

    fn transactions(&self) -> ApiResult<Vec<Transaction>> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .cloned()
            .map(|txn| self.resolve_names(txn))
            .collect())
    }

    fn transaction(&self, id: RecordId) -> ApiResult<Transaction> {
        self.snapshot
            .transactions
            .iter()
            .find(|txn| txn.id == id)
            .cloned()
            .map(|txn| self.resolve_names(txn))
            .ok_or(ApiError::NotFound {
                entity: EntityKind::Transaction,
                id,
            })
    }

    fn create_transaction(&mut self, request: TransactionRequest) -> ApiResult<Transaction> {
        let id = Self::next_id(&self.snapshot.transactions);
        let transaction = self.build_transaction(id, request)?;
        let mut next = self.snapshot.clone();
        next.transactions.push(transaction.clone());
        self.commit(next)?;
        info!(id, "transaction created");
        Ok(transaction)
    }

    fn update_transaction(
        &mut self,
        id: RecordId,
        request: TransactionRequest,
    ) -> ApiResult<Transaction> {
        let transaction = self.build_transaction(id, request)?;
        let mut next = self.snapshot.clone();
        if !replace_by_id(&mut next.transactions, transaction.clone()) {
            return Err(ApiError::NotFound {
                entity: EntityKind::Transaction,
                id,
            });
        }
        self.commit(next)?;
        info!(id, "transaction updated");
        Ok(transaction)
    }

    fn delete_transaction(&mut self, id: RecordId) -> ApiResult<()> {
        let mut next = self.snapshot.clone();
        if !remove_by_id(&mut next.transactions, id) {
            return Err(ApiError::NotFound {
                entity: EntityKind::Transaction,
                id,
            });
        }
        self.commit(next)?;
        info!(id, "transaction deleted");
        Ok(())
    }
}
