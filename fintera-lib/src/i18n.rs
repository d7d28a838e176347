//! Translation lookup for the list core's own strings.

use std::collections::HashMap;

/// Looks up user-facing strings by key.
///
/// Constructed once at startup and passed by reference to whatever renders
/// text; there is no ambient locale.
pub trait Translator: Send + Sync {
    /// Returns the string for `key` with `{name}` placeholders replaced from
    /// `params`. Unknown keys render as the key itself.
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// A `HashMap`-backed [`Translator`].
///
/// # Example
///
/// ```
/// use fintera_lib::i18n::{Catalog, Translator};
///
/// let mut catalog = Catalog::english();
/// catalog.insert("list.empty", "Sin resultados");
/// assert_eq!(catalog.t("list.empty", &[]), "Sin resultados");
/// assert_eq!(catalog.t("pagination.page_of", &[("page", "2"), ("pages", "9")]), "Page 2 of 9");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the English strings of the list core.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for (key, value) in [
            ("list.loading", "Loading…"),
            ("list.empty", "No results found."),
            ("list.error", "Could not load the list: {message}"),
            ("list.retry", "Press r to retry."),
            ("pagination.prev", "Previous"),
            ("pagination.next", "Next"),
            ("pagination.page_of", "Page {page} of {pages}"),
            ("pagination.per_page", "{size} per page"),
        ] {
            catalog.insert(key, value);
        }
        catalog
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Adds every entry of `other`, replacing existing keys.
    pub fn extend(&mut self, other: impl IntoIterator<Item = (String, String)>) {
        self.entries.extend(other);
    }
}

impl Translator for Catalog {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.clone(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}
