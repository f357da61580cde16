//! Cursor pagination.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u64 = 50;
/// Largest page size a caller may ask for.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub cursor: Option<String>,
}

impl PageRequest {
    pub fn new(limit: Option<u64>, cursor: Option<String>) -> Result<Self, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }

        // An empty cursor means "from the start", same as no cursor.
        let cursor = cursor.filter(|c| !c.is_empty());

        Ok(Self { limit, cursor })
    }

    /// Rows to fetch: one extra to find out whether another page exists.
    pub fn take(&self) -> u64 {
        self.limit + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

/// A page of results plus the cursor to resume from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Turn a newest-first window of up to `limit + 1` rows into a page.
///
/// The row past `limit` is held back and its key becomes the next cursor.
/// Items come out oldest-first.
pub fn paginate<T>(mut rows: Vec<T>, limit: u64, cursor_of: impl Fn(&T) -> String) -> Page<T> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    let mut next_cursor = None;
    if rows.len() > limit {
        rows.truncate(limit + 1);
        next_cursor = rows.pop().map(|row| cursor_of(&row));
    }

    rows.reverse();

    Page {
        items: rows,
        next_cursor,
    }
}
