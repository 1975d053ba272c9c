/// Fixed page size shared by the toy and review resources.
pub const PAGE_SIZE: usize = 8;

/// `ceil(total / PAGE_SIZE)`; zero matches yield zero pages.
#[must_use]
pub fn max_page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Resolves an optional zero-based page index into (skip, limit).
/// An absent page index means "return the full result set".
#[must_use]
pub fn page_bounds(page_idx: Option<usize>) -> (usize, Option<usize>) {
    match page_idx {
        Some(idx) => (idx * PAGE_SIZE, Some(PAGE_SIZE)),
        None => (0, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_page_count_rounds_up() {
        assert_eq!(max_page_count(0), 0);
        assert_eq!(max_page_count(1), 1);
        assert_eq!(max_page_count(8), 1);
        assert_eq!(max_page_count(9), 2);
        assert_eq!(max_page_count(16), 2);
        assert_eq!(max_page_count(17), 3);
    }

    #[test]
    fn page_bounds_resolve_skip_and_limit() {
        assert_eq!(page_bounds(None), (0, None));
        assert_eq!(page_bounds(Some(0)), (0, Some(8)));
        assert_eq!(page_bounds(Some(3)), (24, Some(8)));
    }
}
