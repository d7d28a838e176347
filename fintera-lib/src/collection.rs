//! Fintera's administrative collections.

use std::fmt;
use std::str::FromStr;

use crate::query::Direction;
use crate::render::Column;

/// A paginated collection exposed by the Fintera backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Real-estate projects.
    Projects,
    /// Lots within projects.
    Lots,
    /// Sale and financing contracts.
    Contracts,
    /// Scheduled and received payments.
    Payments,
    /// Back-office users.
    Users,
    /// Audit trail entries.
    AuditLogs,
}

impl Collection {
    /// Every collection, in menu order.
    pub const ALL: [Collection; 6] = [
        Self::Projects,
        Self::Lots,
        Self::Contracts,
        Self::Payments,
        Self::Users,
        Self::AuditLogs,
    ];

    /// Returns the collection's endpoint path.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Lots => "lots",
            Self::Contracts => "contracts",
            Self::Payments => "payments",
            Self::Users => "users",
            Self::AuditLogs => "audit-logs",
        }
    }

    /// Returns the key the backend puts the item array under.
    pub fn entity_key(self) -> &'static str {
        match self {
            Self::AuditLogs => "audit_logs",
            other => other.endpoint(),
        }
    }

    /// Returns the initial `"field-direction"` sort.
    pub fn default_sort(self) -> &'static str {
        match self {
            Self::Projects | Self::Contracts | Self::AuditLogs => "created_at-desc",
            Self::Lots => "name-asc",
            Self::Payments => "due_date-desc",
            Self::Users => "full_name-asc",
        }
    }

    /// Returns the table columns of row mode.
    pub fn columns(self) -> Vec<Column> {
        match self {
            Self::Projects => vec![
                Column::new("ID", "id"),
                Column::new("Name", "name").sortable_with("name", Direction::Asc),
                Column::new("Location", "location"),
                Column::new("Lots", "lot_count").sortable("lot_count"),
                Column::new("Created", "created_at").sortable("created_at"),
            ],
            Self::Lots => vec![
                Column::new("ID", "id"),
                Column::new("Name", "name").sortable_with("name", Direction::Asc),
                Column::new("Project", "project_name"),
                Column::new("Area", "area").sortable("area"),
                Column::new("Price", "price").sortable("price"),
                Column::new("Status", "status").sortable_with("status", Direction::Asc),
            ],
            Self::Contracts => vec![
                Column::new("ID", "id"),
                Column::new("Customer", "customer_name").sortable_with("customer_name", Direction::Asc),
                Column::new("Lot", "lot_name"),
                Column::new("Amount", "amount").sortable("amount"),
                Column::new("Status", "status").sortable_with("status", Direction::Asc),
                Column::new("Created", "created_at").sortable("created_at"),
            ],
            Self::Payments => vec![
                Column::new("ID", "id"),
                Column::new("Contract", "contract_id"),
                Column::new("Amount", "amount").sortable("amount"),
                Column::new("Due", "due_date").sortable_with("due_date", Direction::Asc),
                Column::new("Status", "status").sortable_with("status", Direction::Asc),
                Column::new("Paid", "paid_at").sortable("paid_at"),
            ],
            Self::Users => vec![
                Column::new("ID", "id"),
                Column::new("Name", "full_name").sortable_with("full_name", Direction::Asc),
                Column::new("Email", "email").sortable_with("email", Direction::Asc),
                Column::new("Role", "role"),
                Column::new("Status", "status"),
            ],
            Self::AuditLogs => vec![
                Column::new("ID", "id"),
                Column::new("User", "user_email"),
                Column::new("Action", "action").sortable_with("action", Direction::Asc),
                Column::new("Entity", "entity_type"),
                Column::new("When", "created_at").sortable("created_at"),
            ],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.endpoint())
    }
}

/// Error returned when parsing an unknown collection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    /// Accepts the endpoint name or the entity key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.endpoint() == name || c.entity_key() == name)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
