//! Pagination controls.

use crate::i18n::Translator;

/// A navigation request produced by [`PaginationView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Move to the given page.
    Page(u32),
    /// Switch to the given page size, starting again at page 1.
    PageSize(u32),
}

/// One control of the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// "Previous" button.
    Prev { enabled: bool },
    /// A numbered page link.
    Page { number: u32, current: bool },
    /// A collapsed range of page numbers.
    Gap,
    /// "Next" button.
    Next { enabled: bool },
}

/// A stateless view over the current page, total pages and page size.
///
/// Every navigation operation returns the [`PageRequest`] to apply, or `None`
/// when it would not change anything; it never mutates the view itself.
///
/// # Example
///
/// ```
/// use fintera_lib::pagination::{PageRequest, PaginationView};
///
/// let view = PaginationView::new(1, 4, 20);
/// assert_eq!(view.go_to_prev(), None);
/// assert_eq!(view.go_to_next(), Some(PageRequest::Page(2)));
/// assert_eq!(view.go_to_page(99), Some(PageRequest::Page(4)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    current_page: u32,
    total_pages: u32,
    page_size: u32,
    page_size_options: Vec<u32>,
}

impl PaginationView {
    /// Creates a view. Page numbers below 1 are treated as 1.
    pub fn new(current_page: u32, total_pages: u32, page_size: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
            page_size,
            page_size_options: Vec::new(),
        }
    }

    /// Sets the sizes offered by the page-size selector.
    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Returns the current page.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the sizes offered by the page-size selector.
    pub fn page_size_options(&self) -> &[u32] {
        &self.page_size_options
    }

    /// Returns `true` if "previous" is enabled.
    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if "next" is enabled.
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Requests the previous page; no-op on the first page.
    pub fn go_to_prev(&self) -> Option<PageRequest> {
        self.can_go_prev()
            .then(|| PageRequest::Page(self.current_page - 1))
    }

    /// Requests the next page; no-op on the last page.
    pub fn go_to_next(&self) -> Option<PageRequest> {
        self.can_go_next()
            .then(|| PageRequest::Page(self.current_page + 1))
    }

    /// Requests page `page`, clamped into `[1, total_pages]`.
    ///
    /// No-op when the clamped page is the current one.
    pub fn go_to_page(&self, page: u32) -> Option<PageRequest> {
        let page = page.clamp(1, self.total_pages);
        (page != self.current_page).then_some(PageRequest::Page(page))
    }

    /// Requests a new page size; no-op for 0 or the current size.
    pub fn set_page_size(&self, page_size: u32) -> Option<PageRequest> {
        (page_size != 0 && page_size != self.page_size).then_some(PageRequest::PageSize(page_size))
    }

    /// Returns the controls of the pagination bar.
    ///
    /// The first and last pages are always linked, as are `window` pages on
    /// each side of the current one; any other run of pages collapses into a
    /// single [`PageLink::Gap`].
    pub fn page_links(&self, window: u32) -> Vec<PageLink> {
        let mut links = vec![PageLink::Prev {
            enabled: self.can_go_prev(),
        }];

        let low = self.current_page.saturating_sub(window).max(1);
        let high = self.current_page.saturating_add(window).min(self.total_pages);

        let mut last = 0;
        let numbers = std::iter::once(1)
            .chain(low..=high)
            .chain(std::iter::once(self.total_pages));
        for number in numbers {
            if number <= last {
                continue;
            }
            if number > last + 1 && last != 0 {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page {
                number,
                current: number == self.current_page,
            });
            last = number;
        }

        links.push(PageLink::Next {
            enabled: self.can_go_next(),
        });
        links
    }

    /// Returns the localized "page X of Y" summary.
    pub fn summary(&self, translator: &dyn Translator) -> String {
        let page = self.current_page.to_string();
        let pages = self.total_pages.to_string();
        translator.t("pagination.page_of", &[("page", page.as_str()), ("pages", pages.as_str())])
    }
}
