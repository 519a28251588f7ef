//! Pagination window
//!
//! Computes page boundaries over an ordered slice. Requested page numbers are
//! clamped into `1..=total_pages`; the navigation controls emitted elsewhere
//! only ever offer adjacent pages, so clamping is the deterministic fallback
//! for anything malformed.

/// One window over an ordered result list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// 1-based page number after clamping
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Number of items on the pages before this one
    pub offset: usize,
    pub items: &'a [T],
}

/// Window `items` to the requested page
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    debug_assert!(page_size > 0);

    let total_items = items.len();
    let total_pages = std::cmp::max(1, total_items.div_ceil(page_size));
    let number = page.clamp(1, total_pages);

    let offset = (number - 1) * page_size;
    let end = std::cmp::min(offset + page_size, total_items);

    Page {
        number,
        total_pages,
        total_items,
        offset,
        items: &items[offset..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn six_items_make_two_pages() {
        let items: Vec<u32> = (1..=6).collect();

        let first = paginate(&items, 1, 5);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items, &[1, 2, 3, 4, 5]);
        assert_eq!(first.offset, 0);

        let second = paginate(&items, 2, 5);
        assert_eq!(second.items, &[6]);
        assert_eq!(second.offset, 5);
    }

    #[test]
    fn exact_multiple_has_no_ghost_page() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 1, 5).total_pages, 2);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let items: Vec<u32> = (1..=12).collect();

        let low = paginate(&items, 0, 5);
        assert_eq!(low.number, 1);
        assert_eq!(low.items, &[1, 2, 3, 4, 5]);

        let high = paginate(&items, 99, 5);
        assert_eq!(high.number, 3);
        assert_eq!(high.items, &[11, 12]);
    }

    #[test]
    fn empty_list_yields_single_empty_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 3, 5);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    proptest! {
        #[test]
        fn window_is_always_in_bounds(
            len in 0usize..100,
            page in 0usize..30,
            page_size in 1usize..10,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let window = paginate(&items, page, page_size);

            prop_assert!(window.number >= 1);
            prop_assert!(window.number <= window.total_pages);
            prop_assert!(window.items.len() <= page_size);
            prop_assert_eq!(window.total_items, len);

            // Global ordinals stay continuous: the first item of the window
            // is exactly `offset` items into the list.
            if let Some(first) = window.items.first() {
                prop_assert_eq!(*first, window.offset);
            }
        }

        #[test]
        fn every_item_appears_on_exactly_one_page(
            len in 1usize..60,
            page_size in 1usize..10,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let total_pages = paginate(&items, 1, page_size).total_pages;

            let mut seen = Vec::new();
            for page in 1..=total_pages {
                seen.extend_from_slice(paginate(&items, page, page_size).items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
