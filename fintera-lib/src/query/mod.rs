//! Query model for paginated collection requests.
//!
//! - [`QueryState`] - filters, sort and page parameters of one list
//! - [`FilterValue`] - a single filter value
//! - [`SortState`] / [`Direction`] - the active sort column
//! - [`PageResult`] - one normalized page of items
//! - [`Item`] / [`ItemId`] - identity of a record within a page

mod filter;
mod item;
mod order;
mod page;
mod state;

pub use filter::FilterValue;
pub use item::Item;
pub use item::ItemId;
pub use order::Direction;
pub use order::SortState;
pub use page::PageResult;
pub use state::QueryState;
pub use state::RESERVED_PARAMS;
