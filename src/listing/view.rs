//! Generic list state shared by every record view: the fetched record set,
//! the active filters and the current page.

use std::num::NonZeroUsize;

use tracing::debug;

use super::filter::{filter_records, FilterSet, Filterable, Predicate};
use super::pagination::{paginate, total_pages, Pager, PAGE_SIZE};

/// Why a rendered list has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The record source returned nothing.
    NoRecords,
    /// Records exist but none pass the active filters.
    NoMatches,
    /// The current page lies past the end of the filtered set.
    PageOutOfRange,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoRecords => "No records yet.",
            EmptyState::NoMatches => "No results match the current filters.",
            EmptyState::PageOutOfRange => "This page is empty.",
        }
    }
}

/// Everything a renderer needs for one frame of a list view.
#[derive(Debug)]
pub struct ListSnapshot<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    /// Number of records passing the filters (not just this page).
    pub matching: usize,
    pub pager: Option<Pager>,
    pub empty: Option<EmptyState>,
}

/// Filter, paginate and reset-page-on-filter-change in one place.
#[derive(Debug, Clone)]
pub struct ListView<T: Filterable> {
    records: Vec<T>,
    filters: FilterSet<T::Field>,
    current_page: usize,
    page_size: NonZeroUsize,
}

impl<T: Filterable> Default for ListView<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Filterable> ListView<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            filters: FilterSet::default(),
            current_page: 1,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Swaps in a freshly fetched record set. The current page is kept; a
    /// page that now lies past the end renders as [`EmptyState::PageOutOfRange`].
    pub fn replace_records(&mut self, records: Vec<T>) {
        debug!(count = records.len(), "list records replaced");
        self.records = records;
    }

    pub fn filters(&self) -> &FilterSet<T::Field> {
        &self.filters
    }

    pub fn set_filter(&mut self, field: T::Field, predicate: Predicate) -> bool {
        let changed = self.filters.set(field, predicate);
        self.after_filter_change(changed)
    }

    /// Replaces the whole filter set, e.g. from an entity criteria form.
    pub fn set_filters(&mut self, filters: FilterSet<T::Field>) -> bool {
        let changed = self.filters != filters;
        self.filters = filters;
        self.after_filter_change(changed)
    }

    pub fn clear_filter(&mut self, field: T::Field) -> bool {
        let changed = self.filters.remove(field);
        self.after_filter_change(changed)
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filters.clear();
        self.after_filter_change(changed)
    }

    fn after_filter_change(&mut self, changed: bool) -> bool {
        if changed {
            debug!(filters = self.filters.len(), "filters changed, back to page 1");
            self.current_page = 1;
        }
        changed
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Jumps to `page`. Page 0 is treated as page 1; pages past the end are
    /// kept as-is and render empty.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Advances one page unless already on the last one.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Steps back one page unless already on the first one.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn filtered(&self) -> Vec<&T> {
        filter_records(&self.records, &self.filters)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn snapshot(&self) -> ListSnapshot<'_, T> {
        let filtered = self.filtered();
        let page = paginate(&filtered, self.current_page, self.page_size);
        let rows: Vec<&T> = page.items.to_vec();
        let empty = if !rows.is_empty() {
            None
        } else if self.records.is_empty() {
            Some(EmptyState::NoRecords)
        } else if filtered.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::PageOutOfRange)
        };
        ListSnapshot {
            rows,
            page: self.current_page,
            matching: filtered.len(),
            pager: Pager::new(self.current_page, page.total_pages),
            empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, PersonField};

    fn people(count: usize) -> Vec<Person> {
        (1..=count)
            .map(|id| {
                let name = if id <= 5 {
                    format!("Selected {id}")
                } else {
                    format!("Other {id}")
                };
                Person::new(id as i64, name, 20 + id as u32)
            })
            .collect()
    }

    #[test]
    fn narrowing_filter_returns_to_first_page() {
        let mut view = ListView::new(people(25));
        view.go_to_page(3);
        assert_eq!(view.snapshot().rows.len(), 5);

        assert!(view.set_filter(PersonField::Name, Predicate::text("selected")));
        let snapshot = view.snapshot();
        assert_eq!(snapshot.page, 1);
        assert_eq!(snapshot.rows.len(), 5);
        assert!(snapshot.pager.is_none());
        assert_eq!(snapshot.empty, None);
    }

    #[test]
    fn unchanged_filter_keeps_page() {
        let mut view = ListView::new(people(25));
        view.set_filter(PersonField::Name, Predicate::text("e"));
        view.go_to_page(2);
        assert!(!view.set_filter(PersonField::Name, Predicate::text("e")));
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn empty_states_distinguish_missing_records_from_no_matches() {
        let empty: ListView<Person> = ListView::default();
        assert_eq!(empty.snapshot().empty, Some(EmptyState::NoRecords));

        let mut view = ListView::new(people(3));
        view.set_filter(PersonField::Name, Predicate::text("nobody"));
        let snapshot = view.snapshot();
        assert!(snapshot.rows.is_empty());
        assert_eq!(snapshot.empty, Some(EmptyState::NoMatches));
        assert_eq!(snapshot.matching, 0);
    }

    #[test]
    fn prev_and_next_respect_disabled_controls() {
        let mut view = ListView::new(people(21));
        assert!(!view.previous_page());
        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.current_page(), 3);
        assert!(!view.next_page());
        assert!(view.previous_page());
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn shrinking_record_set_leaves_page_out_of_range() {
        let mut view = ListView::new(people(11));
        view.go_to_page(2);
        view.replace_records(people(10));
        let snapshot = view.snapshot();
        assert_eq!(snapshot.page, 2);
        assert_eq!(snapshot.empty, Some(EmptyState::PageOutOfRange));
    }

    #[test]
    fn custom_page_size_changes_page_count() {
        let size = NonZeroUsize::new(4).expect("non-zero");
        let mut view = ListView::new(people(10)).with_page_size(size);
        assert_eq!(view.total_pages(), 3);
        view.go_to_page(3);
        assert_eq!(view.snapshot().rows.len(), 2);
    }

    #[test]
    fn pager_reflects_filtered_count() {
        let view = ListView::new(people(95));
        let snapshot = view.snapshot();
        let pager = snapshot.pager.expect("pager shown");
        assert_eq!(pager.total_pages, 10);
        assert_eq!(snapshot.matching, 95);
        assert_eq!(snapshot.rows.first().map(|person| person.id), Some(1));
    }
}
