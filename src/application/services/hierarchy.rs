//! Location hierarchy service
//!
//! Owns the current forest, its stats and the expansion state, and exposes
//! them to a renderer. Rebuilt on every record store change.

use tracing::{debug, info, instrument};

use crate::application::services::Snapshot;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::filter::{self, ALL};
use crate::domain::{
    AggregateStats, ExpansionState, FilterCriteria, LocationForest, LocationRecord, TreeBuilder,
    TreeNode, Warehouse,
};

/// Stateful view over the location hierarchy.
pub struct LocationHierarchy {
    builder: TreeBuilder,
    records: Vec<LocationRecord>,
    warehouses: Vec<Warehouse>,
    forest: LocationForest,
    stats: AggregateStats,
    expansion: ExpansionState,
    /// Seed expansion with the roots on the first non-empty build
    expand_roots: bool,
    seeded: bool,
}

impl LocationHierarchy {
    pub fn new(expand_roots: bool) -> Self {
        Self {
            builder: TreeBuilder::new(),
            records: Vec::new(),
            warehouses: Vec::new(),
            forest: LocationForest::new(),
            stats: AggregateStats::default(),
            expansion: ExpansionState::new(),
            expand_roots,
            seeded: false,
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, expand_roots: bool) -> ApplicationResult<Self> {
        let mut hierarchy = Self::new(expand_roots);
        hierarchy.set_warehouses(snapshot.warehouses);
        hierarchy.refresh(snapshot.locations)?;
        Ok(hierarchy)
    }

    /// Replace the records and rebuild forest and stats.
    ///
    /// On error the previous forest, stats and records stay in place.
    /// Expansion state is kept across rebuilds.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn refresh(&mut self, records: Vec<LocationRecord>) -> ApplicationResult<()> {
        let forest = self.builder.build(&records)?;
        let stats = AggregateStats::compute(&records);

        if !self.seeded && !forest.is_empty() {
            if self.expand_roots {
                self.expansion.initialize(forest.root_ids());
            }
            self.seeded = true;
        }

        info!(
            "hierarchy refreshed: {} locations, {} roots",
            forest.len(),
            forest.roots().len()
        );
        self.forest = forest;
        self.stats = stats;
        self.records = records;
        Ok(())
    }

    pub fn set_warehouses(&mut self, warehouses: Vec<Warehouse>) {
        self.warehouses = warehouses;
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn warehouse_name(&self, id: &str) -> Option<&str> {
        self.warehouses
            .iter()
            .find(|warehouse| warehouse.id == id)
            .map(|warehouse| warehouse.name.as_str())
    }

    /// Selectable warehouse filter values as `(id, label)`, `all` first.
    pub fn warehouse_options(&self) -> Vec<(String, String)> {
        std::iter::once((ALL.to_string(), "All warehouses".to_string()))
            .chain(
                self.warehouses
                    .iter()
                    .map(|warehouse| (warehouse.id.clone(), warehouse.name.clone())),
            )
            .collect()
    }

    pub fn forest(&self) -> &LocationForest {
        &self.forest
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        let expanded = self.expansion.toggle(id);
        debug!("toggle {}: expanded={}", id, expanded);
        expanded
    }

    /// Expand every location of the current forest.
    pub fn expand_all(&mut self) {
        self.expansion.expand_all(self.forest.all_ids());
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Expand all ancestors of `id` so it becomes visible.
    pub fn reveal(&mut self, id: &str) -> ApplicationResult<()> {
        if self.forest.find(id).is_none() {
            return Err(ApplicationError::LocationNotFound(id.to_string()));
        }
        for ancestor in self.forest.ancestors(id) {
            self.expansion.expand(ancestor.id());
        }
        Ok(())
    }

    pub fn filtered_roots(&self, criteria: &FilterCriteria) -> Vec<&TreeNode> {
        filter::apply(&self.forest, criteria)
    }

    /// Nodes a renderer would draw, in pre-order: filtered roots plus every
    /// descendant whose ancestors are all expanded.
    pub fn visible_nodes(&self, criteria: &FilterCriteria) -> Vec<&TreeNode> {
        let mut visible = Vec::new();
        let mut stack: Vec<&TreeNode> = self.filtered_roots(criteria);
        stack.reverse();

        while let Some(node) = stack.pop() {
            visible.push(node);
            if self.expansion.is_expanded(node.id()) {
                stack.extend(
                    node.children
                        .iter()
                        .rev()
                        .filter_map(|&child| self.forest.get_node(child)),
                );
            }
        }
        visible
    }
}

impl Default for LocationHierarchy {
    fn default() -> Self {
        Self::new(true)
    }
}
