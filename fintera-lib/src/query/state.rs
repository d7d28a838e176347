//! Filter, sort and pagination state of one list.

use std::collections::BTreeMap;

use url::form_urlencoded;

use super::FilterValue;
use super::SortState;

/// Parameter names the query itself emits. They can never be filter keys.
pub const RESERVED_PARAMS: [&str; 3] = ["sort", "page", "per_page"];

/// The combined parameters that determine which page of a collection is
/// requested.
///
/// Any change to the filters, the sort or the page size resets `page` to 1 in
/// the same mutation. Changing the page never touches anything else. Setting a
/// value equal to the current one is not a change and returns `false`.
///
/// # Example
///
/// ```
/// use fintera_lib::query::{QueryState, SortState};
///
/// let mut query = QueryState::new(20).with_sort(SortState::parse("due_date-desc"));
/// query.set_page(3);
/// assert!(query.set_filter("status", "paid"));
/// assert_eq!(query.page(), 1);
/// assert_eq!(
///     query.to_query_string(),
///     "status=paid&sort=due_date-desc&page=1&per_page=20"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    filters: BTreeMap<String, FilterValue>,
    sort: SortState,
    page: u32,
    page_size: u32,
}

impl QueryState {
    /// Creates a query for the first page with no filters and no sort.
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: SortState::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// Sets an initial filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// Returns the active filters.
    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    /// Returns the value of a filter.
    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    /// Returns the active sort.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns `true` if `key` is one of [`RESERVED_PARAMS`].
    pub fn is_reserved(key: &str) -> bool {
        RESERVED_PARAMS.contains(&key)
    }

    /// Sets a filter. A blank value removes the filter instead.
    ///
    /// Returns `true` and resets the page to 1 if the filters changed. Reserved
    /// keys are rejected and leave the query untouched.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> bool {
        let key = key.into();
        let value = value.into();

        if Self::is_reserved(&key) {
            log::warn!("rejected filter `{}`: the name is a reserved query parameter", key);
            return false;
        }
        if value.is_blank() {
            return self.remove_filter(&key);
        }
        if self.filters.get(&key) == Some(&value) {
            return false;
        }

        self.filters.insert(key, value);
        self.page = 1;
        true
    }

    /// Removes a filter.
    ///
    /// Returns `true` and resets the page to 1 if the filter was present.
    pub fn remove_filter(&mut self, key: &str) -> bool {
        if self.filters.remove(key).is_none() {
            return false;
        }
        self.page = 1;
        true
    }

    /// Removes every filter.
    ///
    /// Returns `true` and resets the page to 1 if any filter was present.
    pub fn clear_filters(&mut self) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        self.filters.clear();
        self.page = 1;
        true
    }

    /// Replaces the sort.
    ///
    /// Returns `true` and resets the page to 1 if the sort changed.
    pub fn set_sort(&mut self, sort: SortState) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.page = 1;
        true
    }

    /// Moves to page `page` (at least 1). Returns `true` if the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changes the page size (at least 1).
    ///
    /// Returns `true` and resets the page to 1 if the size changed, so the
    /// next fetch never combines the old page number with the new size.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if self.page_size == page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Returns the outgoing query parameters.
    ///
    /// Filters come first in key order, followed by `sort` (omitted when no
    /// field is active), `page` and `per_page`. Blank filters are skipped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .filter(|(key, value)| !value.is_blank() && !Self::is_reserved(key))
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();

        if let Some(sort) = self.sort.to_param() {
            pairs.push(("sort".to_string(), sort));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("per_page".to_string(), self.page_size.to_string()));
        pairs
    }

    /// Returns the URL-encoded query string.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}
