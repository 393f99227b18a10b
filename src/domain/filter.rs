//! Root-level filtering of a location forest.
//!
//! Only the root's own record is tested. A root whose descendants match but
//! which does not match itself is dropped, and descendants are never tested.

use crate::domain::arena::{LocationForest, TreeNode};
use crate::domain::entities::{LocationKind, LocationRecord};
use crate::domain::error::DomainResult;

/// Selector value meaning "no constraint" for warehouse and kind.
pub const ALL: &str = "all";

/// Filter criteria, combined with logical AND. `None`, a warehouse of `all`
/// and blank search text are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub warehouse_id: Option<String>,
    pub kind: Option<LocationKind>,
    /// Case-insensitive substring of `name` or `qualified_name`
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one warehouse; `all` clears the constraint.
    pub fn with_warehouse(mut self, warehouse_id: impl Into<String>) -> Self {
        let warehouse_id = warehouse_id.into();
        self.warehouse_id = if is_all(&warehouse_id) {
            None
        } else {
            Some(warehouse_id)
        };
        self
    }

    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Parse a kind selector; `all` clears the constraint.
    pub fn with_kind_str(mut self, kind: &str) -> DomainResult<Self> {
        self.kind = if is_all(kind) {
            None
        } else {
            Some(kind.parse()?)
        };
        Ok(self)
    }

    /// Search text is trimmed; blank text clears the constraint.
    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        let search_text = search_text.into();
        let trimmed = search_text.trim();
        self.search_text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.warehouse_id.as_deref().map_or(true, is_all)
            && self.kind.is_none()
            && self.search_text.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    pub fn matches(&self, record: &LocationRecord) -> bool {
        if let Some(warehouse_id) = self.warehouse_id.as_deref().filter(|w| !is_all(w)) {
            if record.warehouse_id != warehouse_id {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }
        if let Some(search_text) = self
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = search_text.to_lowercase();
            let hit = record.name.to_lowercase().contains(&needle)
                || record.display_path().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(ALL)
}

/// Keep the nodes whose own record matches, preserving order.
pub fn filter_roots<'a, I>(nodes: I, criteria: &FilterCriteria) -> Vec<&'a TreeNode>
where
    I: IntoIterator<Item = &'a TreeNode>,
{
    nodes
        .into_iter()
        .filter(|node| criteria.matches(&node.record))
        .collect()
}

/// Roots of `forest` matching `criteria`, in display order.
pub fn apply<'a>(forest: &'a LocationForest, criteria: &FilterCriteria) -> Vec<&'a TreeNode> {
    filter_roots(forest.root_nodes(), criteria)
}
