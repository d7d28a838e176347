//! Dual-mode list rendering.
//!
//! The same items are painted either as a vertical stack of cards (narrow
//! viewports) or as table rows under a header (wide viewports). Per-item
//! output comes from a caller-supplied [`ItemRenderer`]; this module decides
//! which of the mutually exclusive list states to show and builds both
//! layouts so switching modes on resize never requires a refetch.

mod column;

pub use column::Column;
pub use column::HeaderCell;

use crate::controller::ListState;
use crate::query::Direction;
use crate::query::SortState;

/// The two presentations of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// One card per item, stacked vertically.
    Card,
    /// One table row per item.
    Row,
}

/// Renders a single item in either display mode.
///
/// # Example
///
/// ```
/// use fintera_lib::render::{DisplayMode, ItemRenderer};
///
/// struct Names;
///
/// impl ItemRenderer<String> for Names {
///     type Output = String;
///
///     fn render(&self, item: &String, index: usize, mode: DisplayMode) -> String {
///         match mode {
///             DisplayMode::Card => format!("[{}] {}", index + 1, item),
///             DisplayMode::Row => item.clone(),
///         }
///     }
/// }
/// ```
pub trait ItemRenderer<T> {
    /// The rendered markup of one item.
    type Output;

    /// Renders `item`, the `index`-th item of the page, in `mode`.
    fn render(&self, item: &T, index: usize, mode: DisplayMode) -> Self::Output;
}

/// What a list shows right now.
///
/// Exactly one of these is shown, chosen in priority order: loading, failed,
/// empty, populated.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<O> {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed. No items are shown; retrying is up to the caller.
    Failed {
        /// Human-readable failure message.
        message: String,
    },
    /// The last fetch succeeded with zero items.
    Empty,
    /// The last fetch succeeded with items.
    Populated {
        /// The layout visible at the current viewport width.
        visible: DisplayMode,
        /// Card layout of every item.
        cards: Vec<O>,
        /// Row layout of every item.
        rows: Vec<O>,
    },
}

impl<O> ListView<O> {
    /// Returns the items of the visible layout, or nothing for non-populated
    /// states.
    pub fn visible_items(&self) -> &[O] {
        match self {
            Self::Populated {
                visible: DisplayMode::Card,
                cards,
                ..
            } => cards,
            Self::Populated {
                visible: DisplayMode::Row,
                rows,
                ..
            } => rows,
            _ => &[],
        }
    }
}

/// Paints list states through an [`ItemRenderer`].
#[derive(Debug, Clone)]
pub struct ListRenderer<R> {
    renderer: R,
    columns: Vec<Column>,
    card_breakpoint: u16,
}

impl<R> ListRenderer<R> {
    /// Creates a renderer with the table columns of row mode.
    pub fn new(renderer: R, columns: Vec<Column>) -> Self {
        Self {
            renderer,
            columns,
            card_breakpoint: 100,
        }
    }

    /// Sets the width below which card mode is used.
    pub fn with_card_breakpoint(mut self, width: u16) -> Self {
        self.card_breakpoint = width;
        self
    }

    /// Returns the item renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the table columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the display mode for a viewport `width`.
    pub fn mode_for_width(&self, width: u16) -> DisplayMode {
        if width < self.card_breakpoint {
            DisplayMode::Card
        } else {
            DisplayMode::Row
        }
    }

    /// Returns the table header, marking the active sort column.
    pub fn header(&self, sort: &SortState) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                label: column.label.clone(),
                sortable: column.is_sortable(),
                active: column
                    .sort_key
                    .as_deref()
                    .filter(|key| sort.is_active_on(key))
                    .map(|_| sort.direction),
            })
            .collect()
    }

    /// Returns the sort request for a click on the header of `column_index`.
    ///
    /// Columns without a sort key are not clickable and yield `None`.
    pub fn sort_request(&self, column_index: usize) -> Option<(&str, Option<Direction>)> {
        let column = self.columns.get(column_index)?;
        let key = column.sort_key.as_deref()?;
        Some((key, column.default_direction))
    }

    /// Renders `state` for a viewport `width`.
    pub fn render<T>(&self, state: &ListState<'_, T>, width: u16) -> ListView<R::Output>
    where
        R: ItemRenderer<T>,
    {
        match state {
            ListState::Loading => ListView::Loading,
            ListState::Failed(error) => ListView::Failed {
                message: error.message(),
            },
            ListState::Empty => ListView::Empty,
            ListState::Ready(page) => {
                let items = page.items();
                let layout = |mode: DisplayMode| -> Vec<R::Output> {
                    items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| self.renderer.render(item, index, mode))
                        .collect()
                };
                ListView::Populated {
                    visible: self.mode_for_width(width),
                    cards: layout(DisplayMode::Card),
                    rows: layout(DisplayMode::Row),
                }
            }
        }
    }
}
