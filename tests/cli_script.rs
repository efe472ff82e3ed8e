mod common;

use predicates::prelude::*;
use predicates::str::{contains, ends_with};

use common::{isolated_home, script};

#[test]
fn script_mode_records_and_reports() {
    let home = isolated_home();
    let input = "\
open people
add \"Ana Souza\" 34
open categories
add Salary income
add Market expense
open transactions
add Paycheck 1.234,56 income 1 1
add Groceries 200 expense 1 2
report
exit
";

    script(&home, input)
        .success()
        .stdout(contains("Created person 1 `Ana Souza`."))
        .stdout(contains("Created category 2 `Market`."))
        .stdout(contains("R$ 1.234,56"))
        .stdout(contains("Grouped by: people"))
        .stdout(contains("Overall: income R$ 1.234,56, expense R$ 200,00, balance R$ 1.034,56"));

    let json = std::fs::read_to_string(home.join("finance.json")).expect("data file");
    assert!(json.contains("\"Ana Souza\""));
    assert!(json.contains("\"Paycheck\""));
}

#[test]
fn linked_person_cannot_be_deleted() {
    let home = isolated_home();
    let input = "\
open people
add Bia 29
open categories
add Food both
open transactions
add Lunch 30 expense 1 1
open people
delete 1
";

    script(&home, input)
        .success()
        .stdout(contains(
            "Cannot delete this person because it has linked transactions.",
        ))
        .stdout(contains("Deleted record").not());
}

#[test]
fn filter_change_returns_to_first_page() {
    let home = isolated_home();
    let mut input = String::from("open people\n");
    for idx in 1..=25 {
        let name = if idx <= 5 {
            format!("Chosen {idx}")
        } else {
            format!("Other {idx}")
        };
        input.push_str(&format!("add \"{name}\" {}\n", 20 + idx));
    }
    input.push_str("page 3\nfilter name chosen\n");

    script(&home, &input)
        .success()
        .stdout(contains("< prev | 1 2 [3] | (next >)"))
        .stdout(ends_with("5 matching records\n"));
}

#[test]
fn age_filter_modes_are_exclusive() {
    let home = isolated_home();
    let input = "\
open people
add Teen 15
add Adult 30
add Senior 70
filter age 30
age-mode range
filter age 30
filter min 18
filter max 65
";

    script(&home, input)
        .success()
        .stdout(contains("Age filter mode: range"))
        .stdout(contains("age filter is in range mode"))
        .stdout(ends_with("1 matching record\n"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = isolated_home();
    script(&home, "opne people\nnext\n")
        .success()
        .stdout(contains("Unknown command `opne`"))
        .stdout(contains("Suggestion: `open`?"))
        .stdout(contains("No list is open."));
}

#[test]
fn config_changes_currency_formatting() {
    let home = isolated_home();
    let input = "\
config set currency usd
config set locale en-US
open categories
add Salary income
open people
add Ana 30
open transactions
add Pay 1500 income 1 1
";

    script(&home, input)
        .success()
        .stdout(contains("Configuration updated."))
        .stdout(contains("$1,500.00"));

    let config = std::fs::read_to_string(home.join("config.json")).expect("config file");
    assert!(config.contains("\"USD\""));
}
