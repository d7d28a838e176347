//! Item identity.

use std::fmt;

use serde_json::Value;

/// Identifier of an item, unique within a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// Numeric id.
    Int(i64),
    /// String id (e.g. a UUID or a code).
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A record of a paginated collection.
///
/// The list core only relies on an item's identity; every other field is
/// interpreted by the caller's [`ItemRenderer`](crate::render::ItemRenderer).
pub trait Item {
    /// Returns the item's id, if it has a usable one.
    fn id(&self) -> Option<ItemId>;
}

impl Item for Value {
    fn id(&self) -> Option<ItemId> {
        match self.get("id")? {
            Value::Number(n) => n.as_i64().map(ItemId::Int),
            Value::String(s) => Some(ItemId::Text(s.clone())),
            _ => None,
        }
    }
}
