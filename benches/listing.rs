//! Filter and paginate a large transaction list.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_control::domain::{Transaction, TransactionKind};
use finance_control::listing::{
    build_pager_labels, filter_records, paginate, TransactionCriteria, PAGE_SIZE,
};

fn transactions(count: i64) -> Vec<Transaction> {
    (1..=count)
        .map(|id| Transaction {
            id,
            description: format!("Entry {id}"),
            amount: (id % 500) as f64 + 0.5,
            kind: if id % 3 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            },
            category_id: id % 12 + 1,
            category_name: format!("Category {}", id % 12 + 1),
            person_id: id % 40 + 1,
            person_name: format!("Person {}", id % 40 + 1),
        })
        .collect()
}

fn bench_filter_and_page(c: &mut Criterion) {
    let records = transactions(20_000);
    let criteria = TransactionCriteria {
        description: "entry 1".into(),
        kind: Some(TransactionKind::Expense),
        person_id: None,
        category_id: Some(4),
    };
    let filters = criteria.to_filter_set();

    c.bench_function("filter_then_paginate_20k", |b| {
        b.iter(|| {
            let filtered = filter_records(black_box(&records), &filters);
            let page = paginate(&filtered, 3, PAGE_SIZE);
            black_box(build_pager_labels(page.number, page.total_pages));
        })
    });
}

criterion_group!(benches, bench_filter_and_page);
criterion_main!(benches);
