//! Paginate stage: slice one page out of a [`Table`].
//!
//! Pure functions, no I/O. A page beyond the end of the table is an empty
//! slice, not an error — clients walking pages sequentially get a clean
//! `data: []` terminator instead of having to special-case a 4xx.

use crate::table::Table;
use serde::Serialize;

/// Pagination metadata attached to every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_rows: u64,
    pub rows_per_page: u64,
}

impl PaginationMeta {
    /// Compute metadata for a table of `total_rows` rows.
    ///
    /// `total_pages` is `ceil(total_rows / rows_per_page)`; it is zero only
    /// when the table is empty.
    ///
    /// # Panics
    ///
    /// Panics if `rows_per_page` is zero. The request validator guarantees
    /// `1..=MAX_ROWS_PER_PAGE` for everything the service constructs
    /// itself; callers using this type directly carry the same contract.
    pub fn new(current_page: u64, total_rows: u64, rows_per_page: u64) -> Self {
        debug_assert!(rows_per_page > 0, "rows_per_page must be >= 1");
        Self {
            current_page,
            total_pages: total_rows.div_ceil(rows_per_page),
            total_rows,
            rows_per_page,
        }
    }
}

/// Select the row range for `page` (1-indexed): half-open indices into the
/// table's rows, clipped to the row count.
pub fn page_bounds(table: &Table, page: u64, rows_per_page: u64) -> (usize, usize) {
    let total = table.total_rows();
    let start = page.saturating_sub(1).saturating_mul(rows_per_page).min(total);
    let end = start.saturating_add(rows_per_page).min(total);
    (start as usize, end as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn table_with_rows(n: usize) -> Table {
        let rows = (0..n).map(|i| vec![Cell::Number(i as f64)]).collect();
        Table::new(vec!["n".into()], rows)
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(PaginationMeta::new(1, 10, 3).total_pages, 4);
        assert_eq!(PaginationMeta::new(1, 9, 3).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 1, 5000).total_pages, 1);
    }

    #[test]
    #[should_panic]
    fn zero_rows_per_page_panics() {
        PaginationMeta::new(1, 10, 0);
    }

    #[test]
    fn total_pages_zero_only_for_empty_table() {
        assert_eq!(PaginationMeta::new(1, 0, 100).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 1, 100).total_pages, 1);
    }

    #[test]
    fn slices_are_contiguous_and_clipped() {
        let t = table_with_rows(10);
        assert_eq!(page_bounds(&t, 1, 4), (0, 4));
        assert_eq!(page_bounds(&t, 2, 4), (4, 8));
        // Last page is short, clipped to the row count.
        assert_eq!(page_bounds(&t, 3, 4), (8, 10));
    }

    #[test]
    fn page_beyond_range_is_empty_not_an_error() {
        let t = table_with_rows(10);
        let (start, end) = page_bounds(&t, 4, 4);
        assert_eq!(start, end);

        // Far beyond, including values whose offset would overflow.
        let (start, end) = page_bounds(&t, u64::MAX, u64::MAX);
        assert_eq!(start, end);
    }

    #[test]
    fn page_length_never_exceeds_rows_per_page() {
        let t = table_with_rows(23);
        for page in 1..=6 {
            let (start, end) = page_bounds(&t, page, 5);
            assert!(end - start <= 5, "page {page}");
        }
    }
}
