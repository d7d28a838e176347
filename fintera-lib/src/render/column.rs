//! Table columns and header cells.

use crate::query::Direction;

/// A table column of row mode.
///
/// Columns with a `sort_key` have clickable headers; clicking one asks the
/// [`SortController`](crate::sort::SortController) to sort by that key,
/// starting in `default_direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header label.
    pub label: String,
    /// Item field displayed in this column.
    pub field: String,
    /// Sort key sent to the backend, if the column is sortable.
    pub sort_key: Option<String>,
    /// Direction used when this column becomes the active sort.
    pub default_direction: Option<Direction>,
}

impl Column {
    /// Creates a non-sortable column displaying `field`.
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
            sort_key: None,
            default_direction: None,
        }
    }

    /// Makes the column sortable by `key`.
    pub fn sortable(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Makes the column sortable by `key`, starting in `direction`.
    pub fn sortable_with(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.sort_key = Some(key.into());
        self.default_direction = Some(direction);
        self
    }

    /// Returns `true` if the header is clickable.
    pub fn is_sortable(&self) -> bool {
        self.sort_key.is_some()
    }
}

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Header label.
    pub label: String,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    /// Direction indicator when this column is the active sort.
    pub active: Option<Direction>,
}
