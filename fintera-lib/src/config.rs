//! List configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default quiet interval before a search term is propagated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default minimum search length; shorter input means "not searching".
pub const DEFAULT_MIN_SEARCH_LEN: usize = 3;

/// Behavior settings shared by every list.
///
/// Deserializable so it can be embedded in a settings file; unspecified
/// fields keep their defaults.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fintera_lib::config::ListConfig;
///
/// let config = ListConfig::default()
///     .with_page_size(50)
///     .with_debounce(Duration::from_millis(300))
///     .with_min_search_len(2);
/// assert_eq!(config.debounce(), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Initial page size.
    ///
    /// Default: 20
    pub page_size: u32,

    /// Page sizes offered by the page-size selector.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<u32>,

    /// Quiet interval of the search debouncer, in milliseconds.
    ///
    /// Default: 500
    pub debounce_ms: u64,

    /// Minimum search length, in characters.
    ///
    /// Default: 3
    pub min_search_len: usize,

    /// Query parameter that carries the search term.
    ///
    /// Default: `search`
    pub search_param: String,

    /// Viewports narrower than this many columns render in card mode.
    ///
    /// Default: 100
    pub card_breakpoint: u16,

    /// Page links shown on each side of the current page.
    ///
    /// Default: 2
    pub page_window: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50, 100],
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            min_search_len: DEFAULT_MIN_SEARCH_LEN,
            search_param: "search".to_string(),
            card_breakpoint: 100,
            page_window: 2,
        }
    }
}

impl ListConfig {
    /// Returns the debounce interval.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered by the selector.
    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the minimum search length.
    pub fn with_min_search_len(mut self, len: usize) -> Self {
        self.min_search_len = len;
        self
    }

    /// Sets the search query parameter.
    pub fn with_search_param(mut self, param: impl Into<String>) -> Self {
        self.search_param = param.into();
        self
    }

    /// Sets the card-mode breakpoint.
    pub fn with_card_breakpoint(mut self, columns: u16) -> Self {
        self.card_breakpoint = columns;
        self
    }

    /// Sets the page link window.
    pub fn with_page_window(mut self, window: u32) -> Self {
        self.page_window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ListConfig =
            serde_json::from_str(r#"{"page_size": 50, "debounce_ms": 250}"#).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.min_search_len, DEFAULT_MIN_SEARCH_LEN);
        assert_eq!(config.search_param, "search");
    }
}
