//! Filter values for collection queries.

use std::fmt;

/// A single filter value sent as a query parameter.
///
/// Blank values (`Null` and empty text) are never sent; setting a filter to a
/// blank value removes it from the query.
///
/// # Example
///
/// ```
/// use fintera_lib::query::FilterValue;
///
/// assert_eq!(FilterValue::from("paid").to_string(), "paid");
/// assert_eq!(FilterValue::from(42).to_string(), "42");
/// assert!(FilterValue::from(None::<&str>).is_blank());
/// assert!(FilterValue::from("").is_blank());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Free text or an enumerated value such as a status.
    Text(String),
    /// Integer value, e.g. a project id.
    Int(i64),
    /// Floating point value, e.g. an amount bound.
    Float(f64),
    /// No value.
    Null,
}

impl FilterValue {
    /// Returns `true` if this value must be omitted from the query.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
