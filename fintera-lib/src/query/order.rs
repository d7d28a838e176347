//! Sort direction and sort state.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    #[default]
    Desc,
}

impl Direction {
    /// Parses `"asc"` or `"desc"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort of a list: an optional field plus a direction.
///
/// Serialized on the wire as `"<field>-<direction>"`, e.g. `due_date-desc`.
///
/// # Example
///
/// ```
/// use fintera_lib::query::{Direction, SortState};
///
/// let sort = SortState::parse("due_date-asc");
/// assert_eq!(sort.field.as_deref(), Some("due_date"));
/// assert_eq!(sort.direction, Direction::Asc);
///
/// // Missing or invalid suffix falls back to descending.
/// assert_eq!(SortState::parse("created_at").direction, Direction::Desc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// The field being sorted on, if any.
    pub field: Option<String>,
    /// The sort direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates a sort on `field` in `direction`.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    /// Parses a `"field-direction"` string.
    ///
    /// The field is everything before the last `-`. A missing or unknown
    /// direction suffix yields [`Direction::Desc`]; a string without `-` is
    /// taken as a bare field name. An empty string means "no active sort".
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        match raw.rsplit_once('-') {
            Some((field, suffix)) => Self {
                field: (!field.is_empty()).then(|| field.to_string()),
                direction: Direction::parse(suffix).unwrap_or_default(),
            },
            None => Self {
                field: Some(raw.to_string()),
                direction: Direction::Desc,
            },
        }
    }

    /// Returns `true` if `field` is the active sort field.
    pub fn is_active_on(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// Returns the `sort` query parameter, or `None` when no field is active.
    pub fn to_param(&self) -> Option<String> {
        self.field
            .as_ref()
            .map(|field| format!("{}-{}", field, self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("asc"), Some(Direction::Asc));
        assert_eq!(Direction::parse("DESC"), Some(Direction::Desc));
        assert_eq!(Direction::parse("up"), None);
        assert_eq!(Direction::Asc.flip(), Direction::Desc);
        assert_eq!(Direction::Desc.flip(), Direction::Asc);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            SortState::parse("due_date-desc"),
            SortState::new("due_date", Direction::Desc)
        );
        assert_eq!(
            SortState::parse("name-asc"),
            SortState::new("name", Direction::Asc)
        );
    }

    #[test]
    fn test_sort_parse_fallbacks() {
        assert_eq!(
            SortState::parse("created_at"),
            SortState::new("created_at", Direction::Desc)
        );
        assert_eq!(
            SortState::parse("name-sideways"),
            SortState::new("name", Direction::Desc)
        );
        assert_eq!(SortState::parse(""), SortState::default());
        assert_eq!(SortState::parse("-asc").field, None);
    }

    #[test]
    fn test_sort_param() {
        assert_eq!(
            SortState::new("due_date", Direction::Desc).to_param().as_deref(),
            Some("due_date-desc")
        );
        assert_eq!(SortState::default().to_param(), None);
    }
}
