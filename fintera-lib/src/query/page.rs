//! Page type for paginated collection results.

/// One normalized page of a collection.
///
/// Always satisfies `current_page >= 1` and `total_pages >= 1`, and
/// `current_page <= total_pages` whenever the page has items. A page is
/// replaced wholesale on every fetch; it is never merged with a previous one.
///
/// # Example
///
/// ```
/// use fintera_lib::query::PageResult;
///
/// let page = PageResult::new(vec![1, 2, 3], 2, 5);
/// assert_eq!(page.len(), 3);
/// assert!(page.has_prev());
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T = serde_json::Value> {
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
}

impl<T> PageResult<T> {
    /// Creates a page, normalizing the page numbers.
    ///
    /// Values below 1 become 1. When the page has items but `current_page`
    /// exceeds `total_pages`, `total_pages` is raised to `current_page`.
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32) -> Self {
        let current_page = current_page.max(1);
        let mut total_pages = total_pages.max(1);
        if !items.is_empty() && current_page > total_pages {
            total_pages = current_page;
        }
        Self {
            items,
            current_page,
            total_pages,
        }
    }

    /// Creates an empty single page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 1)
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the 1-based page number.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Converts every item, keeping the page numbers.
    ///
    /// Stops at the first conversion failure.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PageResult<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(PageResult {
            items,
            current_page: self.current_page,
            total_pages: self.total_pages,
        })
    }
}
