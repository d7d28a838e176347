//! Response envelope normalization.
//!
//! Backends wrap collection results in different envelopes. The item array may
//! sit under the collection's own key (`{"contracts": [...]}`), under a
//! generic key (`items`, `data`), or be the body itself. Pagination metadata,
//! when present, lives in a `pagination` object with `page` and `pages`.
//!
//! Normalization never fails: an unrecognized shape degrades to an empty
//! single page and is reported as a [`ShapeWarning`].

use std::fmt;

use serde_json::Map;
use serde_json::Value;

use crate::query::PageResult;

/// Generic keys tried after the caller's entity key.
const FALLBACK_KEYS: [&str; 2] = ["items", "data"];

/// A recoverable mismatch between a response and the expected envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeWarning {
    /// No array under the entity key, `items`, `data`, or at the top level.
    MissingItems,
    /// No `pagination` object; the page is assumed to be the only one.
    MissingPagination,
    /// A `pagination` field was present but unusable.
    InvalidPagination(&'static str),
}

impl fmt::Display for ShapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingItems => f.write_str("response has no item array"),
            Self::MissingPagination => f.write_str("response has no pagination block"),
            Self::InvalidPagination(field) => {
                write!(f, "pagination field `{}` is missing or not a positive integer", field)
            }
        }
    }
}

/// Result of normalizing one response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The normalized page.
    pub page: PageResult<Value>,
    /// Shape mismatches encountered along the way.
    pub warnings: Vec<ShapeWarning>,
}

/// Normalizes a response body into a page.
///
/// `requested_page` is used when the server does not report the page it
/// served; a reported page always wins.
pub fn normalize(body: Value, entity_key: Option<&str>, requested_page: u32) -> Normalized {
    let mut warnings = Vec::new();

    let (items, pagination) = match body {
        Value::Array(items) => (Some(items), None),
        Value::Object(mut object) => {
            let items = take_items(&mut object, entity_key);
            (items, object.remove("pagination"))
        }
        _ => (None, None),
    };

    let items = items.unwrap_or_else(|| {
        warnings.push(ShapeWarning::MissingItems);
        Vec::new()
    });

    let (current_page, total_pages) = match pagination {
        Some(Value::Object(pagination)) => {
            let page = positive_int(pagination.get("page")).unwrap_or_else(|| {
                warnings.push(ShapeWarning::InvalidPagination("page"));
                requested_page
            });
            let pages = positive_int(pagination.get("pages")).unwrap_or_else(|| {
                warnings.push(ShapeWarning::InvalidPagination("pages"));
                1
            });
            (page, pages)
        }
        Some(_) => {
            warnings.push(ShapeWarning::InvalidPagination("pagination"));
            (requested_page, 1)
        }
        None => {
            warnings.push(ShapeWarning::MissingPagination);
            (requested_page, 1)
        }
    };

    Normalized {
        page: PageResult::new(items, current_page, total_pages),
        warnings,
    }
}

/// Takes the first array found under the entity key or a fallback key.
fn take_items(object: &mut Map<String, Value>, entity_key: Option<&str>) -> Option<Vec<Value>> {
    entity_key
        .into_iter()
        .chain(FALLBACK_KEYS)
        .find_map(|key| match object.get_mut(key) {
            Some(Value::Array(items)) => Some(std::mem::take(items)),
            _ => None,
        })
}

/// Reads a page number given as a JSON number or a numeric string.
fn positive_int(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n >= 1)
}
