//! Arena-backed location forest.

use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::LocationRecord;

/// Tree node in the arena-based location forest.
#[derive(Debug)]
pub struct TreeNode {
    /// Location this node wraps
    pub record: LocationRecord,
    /// 0 for roots, parent depth + 1 otherwise
    pub depth: usize,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, sorted by name (case-insensitive), then id
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Forest of location trees.
///
/// Nodes live in a generational arena and reference each other by [`Index`].
/// A forest is built once by [`crate::domain::TreeBuilder`] and never mutated
/// afterwards; a record store change produces a new forest.
#[derive(Debug)]
pub struct LocationForest {
    pub(crate) arena: Arena<TreeNode>,
    pub(crate) roots: Vec<Index>,
    pub(crate) by_id: HashMap<String, Index>,
    /// Ids promoted to root because their parent id was not found
    pub(crate) orphans: Vec<String>,
}

impl Default for LocationForest {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationForest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
            orphans: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Root indices in display order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.roots.iter().filter_map(|&idx| self.arena.get(idx))
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.arena.get(idx))
    }

    pub fn root_ids(&self) -> Vec<String> {
        self.root_nodes().map(|node| node.record.id.clone()).collect()
    }

    pub fn all_ids(&self) -> HashSet<String> {
        self.by_id.keys().cloned().collect()
    }

    /// Ids of records whose parent reference did not resolve, sorted.
    pub fn orphan_ids(&self) -> &[String] {
        &self.orphans
    }

    /// Ancestors of `id`, nearest first. Empty for roots and unknown ids.
    #[instrument(level = "trace", skip(self))]
    pub fn ancestors(&self, id: &str) -> Vec<&TreeNode> {
        let mut result = Vec::new();
        let mut current = self.find(id).and_then(|node| node.parent);
        while let Some(idx) = current {
            match self.arena.get(idx) {
                Some(node) => {
                    result.push(node);
                    current = node.parent;
                }
                None => break,
            }
        }
        result
    }

    /// Number of levels in the deepest tree, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        self.iter()
            .map(|(_, node)| node.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ids of all nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_ids(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.record.id.clone())
            .collect()
    }

    /// Records in pre-order. Rebuilding from the result yields the same forest.
    pub fn flatten(&self) -> Vec<LocationRecord> {
        self.iter().map(|(_, node)| node.record.clone()).collect()
    }

    /// `(depth, id)` pairs in pre-order; equal outlines mean equal structure.
    pub fn outline(&self) -> Vec<(usize, String)> {
        self.iter()
            .map(|(_, node)| (node.depth, node.record.id.clone()))
            .collect()
    }

    /// Sum of `item_count` over every node's subtree, keyed by node index.
    #[instrument(level = "debug", skip(self))]
    pub fn subtree_item_totals(&self) -> HashMap<Index, u64> {
        let mut totals: HashMap<Index, u64> = HashMap::with_capacity(self.len());
        for (idx, node) in self.iter_postorder() {
            let children_total: u64 = node
                .children
                .iter()
                .map(|child| totals.get(child).copied().unwrap_or(0))
                .sum();
            totals.insert(idx, node.record.item_count + children_total);
        }
        totals
    }

    /// Pre-order traversal of the whole forest.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Pre-order traversal of the subtree rooted at `idx`.
    pub fn iter_subtree(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, vec![idx])
    }

    /// Post-order traversal of the whole forest (children before parents).
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    forest: &'a LocationForest,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(forest: &'a LocationForest, stack: Vec<Index>) -> Self {
        Self { forest, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a LocationForest,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a LocationForest) -> Self {
        let stack = forest.roots.iter().rev().map(|&idx| (idx, false)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
