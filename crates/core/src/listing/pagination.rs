use std::ops::RangeInclusive;

/// One page of a larger slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Length of the whole slice.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Page numbers to offer for navigation: `1..=total_pages`.
    #[must_use]
    pub const fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of pages needed for `total_items`; a page size of zero is treated
/// as one.
#[must_use]
pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = if page_size == 0 { 1 } else { page_size };
    total_items.div_ceil(page_size)
}

/// Cut page `page` (1-based) out of `items`.
///
/// Page 0 is treated as page 1. A page past the end yields no items but
/// still reports the real totals.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items.get(start..end).unwrap_or(&[]),
        page,
        page_size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_and_remainder() {
        let items: Vec<u32> = (1..=21).collect();

        let first = paginate(&items, 1, 8);
        assert_eq!(first.items, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3, 8);
        assert_eq!(last.items, &[17, 18, 19, 20, 21]);
        assert!(!last.has_next());
        assert_eq!(last.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let items = [1, 2, 3];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, &[1, 2]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items = [1, 2, 3];
        let page = paginate(&items, 5, 2);
        assert!(page.is_empty());
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_input() {
        let items: [u8; 0] = [];
        let page = paginate(&items, 1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_numbers().count(), 0);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }
}
