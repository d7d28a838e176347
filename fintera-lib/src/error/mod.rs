//! Error types

mod auth;
mod fetch;

pub use auth::*;
pub use fetch::*;
