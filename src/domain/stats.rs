//! Aggregate counts over a flat record collection.

use std::collections::BTreeMap;

use crate::domain::entities::{LocationKind, LocationRecord};

/// Summary counts, independent of record order and tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    pub total: usize,
    /// Always holds every kind, zero when absent
    pub by_kind: BTreeMap<LocationKind, usize>,
    pub scrap_count: usize,
    pub return_count: usize,
    /// Sum of `item_count`
    pub total_items: u64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            total: 0,
            by_kind: LocationKind::ALL.into_iter().map(|kind| (kind, 0)).collect(),
            scrap_count: 0,
            return_count: 0,
            total_items: 0,
        }
    }
}

impl AggregateStats {
    /// Single pass over `records`.
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LocationRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            *stats.by_kind.entry(record.kind).or_insert(0) += 1;
            if record.is_scrap_location {
                stats.scrap_count += 1;
            }
            if record.is_return_location {
                stats.return_count += 1;
            }
            stats.total_items += record.item_count;
        }
        stats
    }

    pub fn count(&self, kind: LocationKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}
