//! Sort controller for clickable column headers.

use crate::query::Direction;
use crate::query::SortState;

/// Tracks the active sort column of a list.
///
/// Clicking the active column flips its direction; clicking any other column
/// makes it active with that column's declared default direction
/// ([`Direction::Desc`] when it declares none). The cycle never terminates.
///
/// # Example
///
/// ```
/// use fintera_lib::query::Direction;
/// use fintera_lib::sort::SortController;
///
/// let mut sort = SortController::new("created_at-desc");
/// sort.request("created_at", None);
/// assert_eq!(sort.direction(), Direction::Asc);
///
/// sort.request("amount", Some(Direction::Asc));
/// assert_eq!(sort.field(), Some("amount"));
/// assert_eq!(sort.direction(), Direction::Asc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortController {
    state: SortState,
}

impl SortController {
    /// Creates a controller from a `"field-direction"` default.
    pub fn new(default: &str) -> Self {
        Self {
            state: SortState::parse(default),
        }
    }

    /// Creates a controller from an existing sort state.
    pub fn from_state(state: SortState) -> Self {
        Self { state }
    }

    /// Returns the current sort state.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Returns the active field, if any.
    pub fn field(&self) -> Option<&str> {
        self.state.field.as_deref()
    }

    /// Returns the current direction.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Handles a request to sort by `column`.
    ///
    /// Returns the new state. The caller is expected to reset the page and
    /// refetch on every call.
    pub fn request(&mut self, column: &str, default_direction: Option<Direction>) -> &SortState {
        if self.state.is_active_on(column) {
            self.state.direction = self.state.direction.flip();
        } else {
            self.state = SortState::new(column, default_direction.unwrap_or_default());
        }
        &self.state
    }
}
