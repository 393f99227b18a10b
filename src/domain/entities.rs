//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Kind of a storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationKind {
    Internal,
    Vendor,
    Customer,
    InventoryAdjustment,
    Procurement,
    Production,
    Transit,
    View,
}

impl LocationKind {
    /// Every kind, in declaration order.
    pub const ALL: [LocationKind; 8] = [
        LocationKind::Internal,
        LocationKind::Vendor,
        LocationKind::Customer,
        LocationKind::InventoryAdjustment,
        LocationKind::Procurement,
        LocationKind::Production,
        LocationKind::Transit,
        LocationKind::View,
    ];

    /// Canonical textual form, as used in snapshots and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Internal => "internal",
            LocationKind::Vendor => "vendor",
            LocationKind::Customer => "customer",
            LocationKind::InventoryAdjustment => "inventory-adjustment",
            LocationKind::Procurement => "procurement",
            LocationKind::Production => "production",
            LocationKind::Transit => "transit",
            LocationKind::View => "view",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = DomainError;

    /// Case-insensitive; `_` is accepted in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        LocationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownKind(s.to_string()))
    }
}

/// One storage location as supplied by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Unique within one snapshot
    pub id: String,
    /// Short display label
    pub name: String,
    /// Fully pathed display label, e.g. "WH/Stock/Aisle A"
    #[serde(default)]
    pub qualified_name: String,
    /// Owning warehouse
    pub warehouse_id: String,
    /// Parent location; `None` (or an unknown id) makes this a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub kind: LocationKind,
    #[serde(default)]
    pub is_scrap_location: bool,
    #[serde(default)]
    pub is_return_location: bool,
    /// Stock units currently assigned
    #[serde(default)]
    pub item_count: u64,
}

impl LocationRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        warehouse_id: impl Into<String>,
        kind: LocationKind,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            qualified_name: name.clone(),
            name,
            warehouse_id: warehouse_id.into(),
            parent_id: None,
            kind,
            is_scrap_location: false,
            is_return_location: false,
            item_count: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    pub fn with_item_count(mut self, item_count: u64) -> Self {
        self.item_count = item_count;
        self
    }

    /// Mark as scrap location.
    pub fn scrap(mut self) -> Self {
        self.is_scrap_location = true;
        self
    }

    /// Mark as return location.
    pub fn returns(mut self) -> Self {
        self.is_return_location = true;
        self
    }

    /// Qualified name, falling back to `name` when the store left it empty.
    pub fn display_path(&self) -> &str {
        if self.qualified_name.is_empty() {
            &self.name
        } else {
            &self.qualified_name
        }
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

/// Warehouse owning a set of locations. Only used for filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    /// Short code, e.g. "WH"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Warehouse {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
        }
    }
}
