use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use finance_control::{
    api::{FinanceApi, MemoryApi},
    domain::{CategoryRequest, PersonRequest, Purpose, TransactionKind, TransactionRequest},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application directory for one test.
#[allow(dead_code)]
pub fn isolated_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Runs the shell binary in script mode against `home`.
#[allow(dead_code)]
pub fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("finance_control_cli")
        .expect("binary built")
        .env("FINANCE_CONTROL_HOME", home)
        .env("FINANCE_CONTROL_CLI_SCRIPT", "1")
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

/// Two people, three categories and a handful of transactions.
#[allow(dead_code)]
pub fn seeded_api() -> MemoryApi {
    let mut api = MemoryApi::new();
    api.create_category(CategoryRequest::new("Salary", Purpose::Income))
        .expect("category");
    api.create_category(CategoryRequest::new("Groceries", Purpose::Expense))
        .expect("category");
    api.create_category(CategoryRequest::new("Gifts", Purpose::Both))
        .expect("category");
    api.create_person(PersonRequest::new("Ana Souza", 34))
        .expect("person");
    api.create_person(PersonRequest::new("João Lima", 17))
        .expect("person");

    let entries = [
        ("Paycheck", 3000.0, TransactionKind::Income, 1, 1),
        ("Market", 250.0, TransactionKind::Expense, 1, 2),
        ("Birthday", 100.0, TransactionKind::Income, 2, 3),
        ("Snacks", 30.0, TransactionKind::Expense, 2, 2),
        ("Present", 80.0, TransactionKind::Expense, 1, 3),
    ];
    for (description, amount, kind, person_id, category_id) in entries {
        api.create_transaction(TransactionRequest {
            description: description.into(),
            amount,
            kind,
            category_id,
            person_id,
        })
        .expect("transaction");
    }
    api
}
