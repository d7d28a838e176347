//! Fintera list core
//!
//! Async building blocks for the paginated, sortable and filterable lists of the
//! Fintera real-estate financing backend: projects, lots, contracts, payments,
//! users and audit logs.
//!
//! The pieces compose as follows:
//!
//! - [`query::QueryState`] holds filters, sort and page parameters.
//! - [`source::ListDataSource`] turns a query into one authenticated `GET` and
//!   normalizes whatever envelope the backend returns into a [`query::PageResult`].
//! - [`sort::SortController`], [`debounce::FilterDebouncer`] and
//!   [`pagination::PaginationView`] translate user intent into query changes.
//! - [`controller::ListController`] owns the query, issues fetches and only ever
//!   applies the most recent response.
//! - [`render::ListRenderer`] paints the result in card or row mode through a
//!   caller-supplied [`render::ItemRenderer`].

pub mod auth;
pub mod collection;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod i18n;
pub mod pagination;
pub mod query;
pub mod render;
pub mod sort;
pub mod source;

mod client;

pub use client::*;
