//! Page slicing and the compact pager label window.

use std::{fmt, num::NonZeroUsize};

/// Records shown per page in every list view.
pub const PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Up to this many pages are listed without an ellipsis.
pub const MAX_VISIBLE_PAGES: usize = 5;

pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// One page of a record sequence.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Returns the contiguous slice for `current_page` (1-based). Pages past the
/// end, and page 0, yield an empty slice.
pub fn paginate<T>(records: &[T], current_page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let size = page_size.get();
    let len = records.len();
    let items = match current_page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            if start >= len {
                &records[len..]
            } else {
                let end = start.saturating_add(size).min(len);
                &records[start..end]
            }
        }
        None => &records[len..],
    };
    Page {
        items,
        number: current_page,
        total_items: len,
        total_pages: total_pages(len, page_size),
    }
}

/// A pager token: a navigable page number or a gap marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerLabel {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PagerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerLabel::Page(number) => write!(f, "{number}"),
            PagerLabel::Ellipsis => f.write_str("..."),
        }
    }
}

/// Builds the page-number window shown between the previous/next controls.
///
/// With a single page (or none) the pager is suppressed and no labels are
/// produced. Up to [`MAX_VISIBLE_PAGES`] pages are listed in full; beyond that
/// the first and last pages stay visible and the gap around the current page
/// collapses into [`PagerLabel::Ellipsis`].
pub fn build_pager_labels(current_page: usize, total_pages: usize) -> Vec<PagerLabel> {
    use PagerLabel::{Ellipsis, Page};

    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(Page).collect();
    }
    if current_page <= 3 {
        (1..=4).map(Page).chain([Ellipsis, Page(total_pages)]).collect()
    } else if current_page >= total_pages - 2 {
        [Page(1), Ellipsis]
            .into_iter()
            .chain((total_pages - 3..=total_pages).map(Page))
            .collect()
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current_page - 1),
            Page(current_page),
            Page(current_page + 1),
            Ellipsis,
            Page(total_pages),
        ]
    }
}

/// Pager control state for a rendered list. Only exists when there is more
/// than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub current_page: usize,
    pub total_pages: usize,
    pub labels: Vec<PagerLabel>,
}

impl Pager {
    pub fn new(current_page: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        Some(Self {
            current_page,
            total_pages,
            labels: build_pager_labels(current_page, total_pages),
        })
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_current(&self, label: PagerLabel) -> bool {
        label == PagerLabel::Page(self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::PagerLabel::{Ellipsis, Page};
    use super::*;

    #[test]
    fn small_page_counts_list_every_page() {
        for current in 1..=3 {
            assert_eq!(build_pager_labels(current, 3), vec![Page(1), Page(2), Page(3)]);
        }
        assert_eq!(build_pager_labels(2, 5).len(), 5);
    }

    #[test]
    fn single_page_suppresses_pager() {
        assert!(build_pager_labels(1, 1).is_empty());
        assert!(build_pager_labels(1, 0).is_empty());
        assert!(Pager::new(1, 1).is_none());
        assert!(Pager::new(1, 0).is_none());
    }

    #[test]
    fn leading_window_near_first_page() {
        let expected = vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)];
        assert_eq!(build_pager_labels(1, 10), expected);
        assert_eq!(build_pager_labels(3, 10), expected);
    }

    #[test]
    fn centred_window_in_the_middle() {
        assert_eq!(
            build_pager_labels(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            build_pager_labels(4, 6),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn trailing_window_near_last_page() {
        let expected = vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)];
        assert_eq!(build_pager_labels(9, 10), expected);
        assert_eq!(build_pager_labels(8, 10), expected);
        assert_eq!(build_pager_labels(10, 10), expected);
    }

    #[test]
    fn ellipsis_renders_as_three_dots() {
        let rendered: Vec<String> = build_pager_labels(5, 10)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["1", "...", "4", "5", "6", "...", "10"]);
    }

    #[test]
    fn paginate_slices_contiguous_windows() {
        let records: Vec<u32> = (1..=25).collect();
        let page = paginate(&records, 3, PAGE_SIZE);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let records: Vec<u32> = (1..=5).collect();
        assert!(paginate(&records, 2, PAGE_SIZE).is_empty());
        assert!(paginate(&records, 0, PAGE_SIZE).is_empty());
        assert!(paginate(&records, usize::MAX, PAGE_SIZE).is_empty());
    }

    #[test]
    fn page_slices_cover_every_record_once() {
        for total in 0..=57usize {
            let records: Vec<usize> = (0..total).collect();
            let pages = total_pages(total, PAGE_SIZE);
            let covered: Vec<usize> = (1..=pages)
                .flat_map(|number| paginate(&records, number, PAGE_SIZE).items.to_vec())
                .collect();
            assert_eq!(covered, records, "total = {total}");
        }
    }

    #[test]
    fn pager_controls_disable_at_the_edges() {
        let first = Pager::new(1, 4).expect("pager");
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = Pager::new(4, 4).expect("pager");
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert!(last.is_current(Page(4)));
    }
}
