//! Sequential fixed-size pages over a filtered set.

use crate::filter::FilteredSet;
use crate::records::TripRecord;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One window of raw rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'s, 'a> {
    pub rows: &'s [&'a TripRecord],
    /// Index of the first row within the filtered set.
    pub offset: usize,
    pub has_more: bool,
}

impl Page<'_, '_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cursor over one [`FilteredSet`].
///
/// Bound to the set it was created from; a new filter selection needs a new
/// paginator.
#[derive(Debug)]
pub struct RawDataPaginator<'s, 'a> {
    set: &'s FilteredSet<'a>,
    cursor: usize,
    page_size: usize,
}

impl<'s, 'a> RawDataPaginator<'s, 'a> {
    pub fn new(set: &'s FilteredSet<'a>) -> Self {
        Self::with_page_size(set, DEFAULT_PAGE_SIZE)
    }

    /// A zero `page_size` is treated as 1.
    pub fn with_page_size(set: &'s FilteredSet<'a>, page_size: usize) -> Self {
        Self {
            set,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    /// Returns up to `page_size` rows from the cursor and advances past them.
    ///
    /// Once exhausted, keeps returning an empty page with `has_more = false`.
    pub fn next_page(&mut self) -> Page<'s, 'a> {
        let records: &'s [&'a TripRecord] = self.set.records();
        let start = self.cursor.min(records.len());
        let end = start.saturating_add(self.page_size).min(records.len());
        self.cursor = end;

        Page {
            rows: &records[start..end],
            offset: start,
            has_more: end < records.len(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.set.len()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}
