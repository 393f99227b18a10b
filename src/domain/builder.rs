//! Forest builder: turns flat location records into sorted, depth-annotated trees.

use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::arena::{LocationForest, TreeNode};
use crate::domain::entities::LocationRecord;
use crate::domain::error::{DomainError, DomainResult};

/// Constructs location forests from flat record collections.
pub struct TreeBuilder {
    visited: HashSet<Index>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
        }
    }

    /// Build a forest from `records`.
    ///
    /// Records whose parent id is absent or unknown become roots. Roots and
    /// every children list are sorted by name (case-insensitive), ties broken
    /// by id, so the result does not depend on input order.
    ///
    /// # Errors
    /// * [`DomainError::DuplicateIdentifier`] for the first repeated id
    /// * [`DomainError::CyclicHierarchy`] if any record is its own ancestor
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&mut self, records: &[LocationRecord]) -> DomainResult<LocationForest> {
        // Reset state for fresh build
        self.visited.clear();

        let mut forest = LocationForest::new();
        let order = Self::index_records(&mut forest, records)?;
        let mut roots = Self::link_parents(&mut forest, &order);

        sort_siblings(&forest.arena, &mut roots);
        for &idx in &order {
            let mut children = match forest.arena.get_mut(idx) {
                Some(node) => std::mem::take(&mut node.children),
                None => continue,
            };
            sort_siblings(&forest.arena, &mut children);
            if let Some(node) = forest.arena.get_mut(idx) {
                node.children = children;
            }
        }
        forest.roots = roots;

        self.assign_depths(&mut forest)?;

        // Cycle detection: every node must be reachable from some root
        if self.visited.len() < forest.arena.len() {
            return Err(DomainError::CyclicHierarchy(self.cycle_member(&forest)));
        }

        forest.orphans.sort();
        debug!(
            "built forest: {} nodes, {} roots, {} orphans",
            forest.len(),
            forest.roots.len(),
            forest.orphans.len()
        );
        Ok(forest)
    }

    /// Allocate one node per record and index it by id.
    fn index_records(
        forest: &mut LocationForest,
        records: &[LocationRecord],
    ) -> DomainResult<Vec<Index>> {
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            if forest.by_id.contains_key(&record.id) {
                return Err(DomainError::DuplicateIdentifier(record.id.clone()));
            }
            let idx = forest.arena.insert(TreeNode {
                record: record.clone(),
                depth: 0,
                parent: None,
                children: Vec::new(),
            });
            forest.by_id.insert(record.id.clone(), idx);
            order.push(idx);
        }
        Ok(order)
    }

    /// Attach each node to its parent; returns the (unsorted) root list.
    fn link_parents(forest: &mut LocationForest, order: &[Index]) -> Vec<Index> {
        let mut roots = Vec::new();
        for &idx in order {
            let Some(node) = forest.arena.get(idx) else {
                continue;
            };
            let parent_id = node.record.parent_id.clone();
            let parent_idx = parent_id
                .as_deref()
                .and_then(|pid| forest.by_id.get(pid).copied());

            match (parent_id, parent_idx) {
                (_, Some(parent_idx)) => {
                    if let Some(node) = forest.arena.get_mut(idx) {
                        node.parent = Some(parent_idx);
                    }
                    if let Some(parent) = forest.arena.get_mut(parent_idx) {
                        parent.children.push(idx);
                    }
                }
                (Some(dangling), None) => {
                    let id = node.record.id.clone();
                    debug!("parent {} of {} not found, promoting to root", dangling, id);
                    forest.orphans.push(id);
                    roots.push(idx);
                }
                (None, None) => roots.push(idx),
            }
        }
        roots
    }

    /// Top-down depth assignment from the roots.
    fn assign_depths(&mut self, forest: &mut LocationForest) -> DomainResult<()> {
        let mut stack: Vec<(Index, usize)> =
            forest.roots.iter().rev().map(|&idx| (idx, 0)).collect();

        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = forest.arena.get_mut(idx) else {
                continue;
            };
            if !self.visited.insert(idx) {
                return Err(DomainError::CyclicHierarchy(node.record.id.clone()));
            }
            node.depth = depth;
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }

    /// Id of a node on a cycle.
    ///
    /// Starts at the smallest unreachable id and follows parents until a node
    /// repeats. An unreachable node can only lead to other unreachable nodes,
    /// so the walk always ends on the cycle.
    fn cycle_member(&self, forest: &LocationForest) -> String {
        let start = forest
            .arena
            .iter()
            .filter(|(idx, _)| !self.visited.contains(idx))
            .map(|(idx, node)| (node.record.id.as_str(), idx))
            .min_by(|a, b| a.0.cmp(b.0));
        let Some((start_id, mut current)) = start else {
            return String::new();
        };

        let mut seen = HashSet::new();
        loop {
            if !seen.insert(current) {
                return forest
                    .get_node(current)
                    .map(|node| node.record.id.clone())
                    .unwrap_or_else(|| start_id.to_string());
            }
            match forest.get_node(current).and_then(|node| node.parent) {
                Some(parent) => current = parent,
                None => return start_id.to_string(),
            }
        }
    }
}

/// Build a forest with a fresh [`TreeBuilder`].
pub fn build_forest(records: &[LocationRecord]) -> DomainResult<LocationForest> {
    TreeBuilder::new().build(records)
}

fn sort_siblings(arena: &Arena<TreeNode>, siblings: &mut [Index]) {
    siblings.sort_by_cached_key(|&idx| {
        arena
            .get(idx)
            .map(|node| (node.record.name.to_lowercase(), node.record.id.clone()))
            .unwrap_or_default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LocationKind;

    fn rec(id: &str, name: &str, parent: Option<&str>) -> LocationRecord {
        let record = LocationRecord::new(id, name, "WH", LocationKind::Internal);
        match parent {
            Some(p) => record.with_parent(p),
            None => record,
        }
    }

    #[test]
    fn given_self_parented_record_when_building_then_reports_it() {
        let records = vec![rec("1", "Root", None), rec("2", "Loop", Some("2"))];

        let result = build_forest(&records);

        assert_eq!(result.unwrap_err(), DomainError::CyclicHierarchy("2".into()));
    }

    #[test]
    fn given_cycle_below_tail_when_building_then_reports_cycle_member() {
        // "a" hangs off the a <- b <- c <- b cycle; only b and c are on it
        let records = vec![
            rec("a", "A", Some("b")),
            rec("b", "B", Some("c")),
            rec("c", "C", Some("b")),
        ];

        let err = build_forest(&records).unwrap_err();

        assert_eq!(err, DomainError::CyclicHierarchy("b".into()));
    }

    #[test]
    fn given_builder_reused_when_building_then_state_is_reset() {
        let mut builder = TreeBuilder::new();
        let first = builder.build(&[rec("1", "One", None)]).unwrap();
        let second = builder
            .build(&[rec("1", "One", None), rec("2", "Two", Some("1"))])
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.find("2").unwrap().depth, 1);
    }
}
