//! Client-side listing engine: record filtering, page slicing, pager label
//! windows and the per-view state tying them together.

pub mod criteria;
pub mod filter;
pub mod pagination;
pub mod view;

pub use criteria::{AgeFilter, AgeFilterMode, CategoryCriteria, PersonCriteria, TransactionCriteria};
pub use filter::{filter_records, FieldValue, FilterSet, Filterable, Predicate};
pub use pagination::{
    build_pager_labels, paginate, total_pages, Page, Pager, PagerLabel, MAX_VISIBLE_PAGES,
    PAGE_SIZE,
};
pub use view::{EmptyState, ListSnapshot, ListView};
