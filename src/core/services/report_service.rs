//! Per-person and per-category totals, aggregated from the transaction list.

use std::collections::HashMap;
use std::{fmt, str::FromStr};

use tracing::{debug, info};

use crate::api::FinanceApi;
use crate::domain::{
    Category, NamedEntity, OverallTotals, Person, RecordId, ReportRow, Transaction,
    TransactionKind,
};
use crate::listing::ListView;

use super::ServiceResult;

/// Which grouping the report screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    People,
    Categories,
}

impl ReportKind {
    pub fn toggle(self) -> Self {
        match self {
            ReportKind::People => ReportKind::Categories,
            ReportKind::Categories => ReportKind::People,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::People => f.write_str("people"),
            ReportKind::Categories => f.write_str("categories"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "people" | "person" | "pessoas" => Ok(ReportKind::People),
            "categories" | "category" | "categorias" => Ok(ReportKind::Categories),
            other => Err(format!(
                "unknown report `{other}` (expected people or categories)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    income: f64,
    expense: f64,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expense += transaction.amount,
        }
    }

    fn row(self, id: RecordId, name: &str) -> ReportRow {
        ReportRow {
            id,
            name: name.to_string(),
            total_income: self.income,
            total_expense: self.expense,
            balance: self.income - self.expense,
        }
    }
}

fn totals_by<F>(transactions: &[Transaction], key: F) -> HashMap<RecordId, Totals>
where
    F: Fn(&Transaction) -> RecordId,
{
    let mut totals: HashMap<RecordId, Totals> = HashMap::new();
    for transaction in transactions {
        totals.entry(key(transaction)).or_default().add(transaction);
    }
    totals
}

fn rows_for<E, F>(entities: &[E], id_of: F, totals: &HashMap<RecordId, Totals>) -> Vec<ReportRow>
where
    E: NamedEntity,
    F: Fn(&E) -> RecordId,
{
    entities
        .iter()
        .map(|entity| {
            let id = id_of(entity);
            totals
                .get(&id)
                .copied()
                .unwrap_or_default()
                .row(id, entity.name())
        })
        .collect()
}

pub struct ReportService;

impl ReportService {
    /// One row per person in source order; people without transactions get
    /// zero totals.
    pub fn by_person(people: &[Person], transactions: &[Transaction]) -> Vec<ReportRow> {
        let totals = totals_by(transactions, |txn| txn.person_id);
        rows_for(people, |person| person.id, &totals)
    }

    pub fn by_category(categories: &[Category], transactions: &[Transaction]) -> Vec<ReportRow> {
        let totals = totals_by(transactions, |txn| txn.category_id);
        rows_for(categories, |category| category.id, &totals)
    }

    pub fn overall(transactions: &[Transaction]) -> OverallTotals {
        let mut totals = Totals::default();
        for transaction in transactions {
            totals.add(transaction);
        }
        OverallTotals {
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.income - totals.expense,
        }
    }

    /// Fetches everything needed and builds the report for `kind`.
    pub fn load(api: &dyn FinanceApi, kind: ReportKind) -> ServiceResult<Report> {
        let people = api.people()?;
        let categories = api.categories()?;
        let transactions = api.transactions()?;
        info!(%kind, transactions = transactions.len(), "report loaded");
        Ok(Report {
            kind,
            by_person: Self::by_person(&people, &transactions),
            by_category: Self::by_category(&categories, &transactions),
            rows: ListView::default(),
            overall: Self::overall(&transactions),
        }
        .with_rows())
    }
}

/// Report screen state: both groupings are kept so the toggle does not need
/// another fetch.
#[derive(Debug, Clone)]
pub struct Report {
    kind: ReportKind,
    by_person: Vec<ReportRow>,
    by_category: Vec<ReportRow>,
    rows: ListView<ReportRow>,
    overall: OverallTotals,
}

impl Report {
    fn with_rows(mut self) -> Self {
        self.rows = ListView::new(self.current_rows());
        self
    }

    fn current_rows(&self) -> Vec<ReportRow> {
        match self.kind {
            ReportKind::People => self.by_person.clone(),
            ReportKind::Categories => self.by_category.clone(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn overall(&self) -> OverallTotals {
        self.overall
    }

    pub fn rows(&self) -> &ListView<ReportRow> {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut ListView<ReportRow> {
        &mut self.rows
    }

    /// Switches grouping and returns to page 1.
    pub fn switch(&mut self, kind: ReportKind) {
        debug!(from = %self.kind, to = %kind, "report grouping switched");
        self.kind = kind;
        self.rows = ListView::new(self.current_rows());
    }

    pub fn toggle(&mut self) {
        self.switch(self.kind.toggle());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use crate::domain::{CategoryRequest, PersonRequest, Purpose, TransactionRequest};

    fn txn(
        id: RecordId,
        amount: f64,
        kind: TransactionKind,
        person: RecordId,
        category: RecordId,
    ) -> Transaction {
        Transaction {
            id,
            description: format!("T{id}"),
            amount,
            kind,
            category_id: category,
            category_name: String::new(),
            person_id: person,
            person_name: String::new(),
        }
    }

    #[test]
    fn totals_per_person_include_idle_people() {
        let people = vec![Person::new(1, "Ana", 30), Person::new(2, "Bia", 22)];
        let transactions = vec![
            txn(1, 100.0, TransactionKind::Income, 1, 1),
            txn(2, 40.0, TransactionKind::Expense, 1, 2),
        ];
        let rows = ReportService::by_person(&people, &transactions);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_income, 100.0);
        assert_eq!(rows[0].total_expense, 40.0);
        assert_eq!(rows[0].balance, 60.0);
        assert_eq!(rows[1], ReportRow::empty(2, "Bia"));
    }

    #[test]
    fn overall_balance_is_income_minus_expense() {
        let transactions = vec![
            txn(1, 10.0, TransactionKind::Income, 1, 1),
            txn(2, 25.0, TransactionKind::Expense, 1, 1),
        ];
        let overall = ReportService::overall(&transactions);
        assert_eq!(overall.total_income, 10.0);
        assert_eq!(overall.total_expense, 25.0);
        assert_eq!(overall.balance, -15.0);
        assert_eq!(ReportService::overall(&[]), OverallTotals::default());
    }

    #[test]
    fn switching_grouping_resets_page() {
        let mut api = MemoryApi::new();
        for idx in 1..=12 {
            api.create_person(PersonRequest::new(format!("P{idx}"), 20))
                .expect("person");
        }
        api.create_category(CategoryRequest::new("General", Purpose::Both))
            .expect("category");
        api.create_transaction(TransactionRequest {
            description: "Pay".into(),
            amount: 50.0,
            kind: TransactionKind::Income,
            category_id: 1,
            person_id: 3,
        })
        .expect("transaction");

        let mut report = ReportService::load(&api, ReportKind::People).expect("report");
        assert_eq!(report.rows().records().len(), 12);
        report.rows_mut().go_to_page(2);

        report.toggle();
        assert_eq!(report.kind(), ReportKind::Categories);
        assert_eq!(report.rows().current_page(), 1);
        assert_eq!(report.rows().records()[0].balance, 50.0);
        assert_eq!(report.overall().balance, 50.0);
        assert_eq!("pessoas".parse::<ReportKind>(), Ok(ReportKind::People));
    }
}
