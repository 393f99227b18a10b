//! Tree rendering for terminal output via termtree.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::application::services::LocationHierarchy;
use crate::domain::{FilterCriteria, TreeNode};

/// Marker for an expanded node with children.
pub const EXPANDED: &str = "▾";
/// Marker for a collapsed node with children.
pub const COLLAPSED: &str = "▸";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_item_counts: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_item_counts: true,
        }
    }
}

/// One termtree per filtered root, descending only into expanded nodes.
pub fn render_forest(
    hierarchy: &LocationHierarchy,
    criteria: &FilterCriteria,
    options: &RenderOptions,
) -> Vec<Tree<String>> {
    let totals = if options.show_item_counts {
        hierarchy.forest().subtree_item_totals()
    } else {
        HashMap::new()
    };

    hierarchy
        .filtered_roots(criteria)
        .into_iter()
        .filter_map(|root| hierarchy.forest().index_of(root.id()))
        .map(|idx| render_root(hierarchy, idx, &totals, options))
        .collect()
}

/// Build bottom-up: visible nodes are collected in pre-order, then labelled
/// in reverse so every child tree exists before its parent is assembled.
fn render_root(
    hierarchy: &LocationHierarchy,
    root: Index,
    totals: &HashMap<Index, u64>,
    options: &RenderOptions,
) -> Tree<String> {
    let forest = hierarchy.forest();
    let mut order: Vec<(Index, bool)> = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(node) = forest.get_node(idx) else {
            continue;
        };
        let expanded = hierarchy.is_expanded(node.id());
        order.push((idx, expanded));
        if expanded {
            stack.extend(node.children.iter().rev().copied());
        }
    }

    let mut built: HashMap<Index, Tree<String>> = HashMap::with_capacity(order.len());
    for &(idx, expanded) in order.iter().rev() {
        let Some(node) = forest.get_node(idx) else {
            continue;
        };
        let total = options
            .show_item_counts
            .then(|| totals.get(&idx).copied().unwrap_or(node.record.item_count));
        let mut tree = Tree::new(node_label(node, expanded, total));
        if expanded {
            tree.leaves = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
        }
        built.insert(idx, tree);
    }

    built
        .remove(&root)
        .unwrap_or_else(|| Tree::new(String::new()))
}

/// `▾ Stock [1] (view) · 52 items`
pub fn node_label(node: &TreeNode, expanded: bool, item_total: Option<u64>) -> String {
    let mut label = String::new();
    if !node.is_leaf() {
        label.push_str(if expanded { EXPANDED } else { COLLAPSED });
        label.push(' ');
    }
    label.push_str(&format!(
        "{} [{}] ({})",
        node.record.name, node.record.id, node.record.kind
    ));
    if node.record.is_scrap_location {
        label.push_str(" scrap");
    }
    if node.record.is_return_location {
        label.push_str(" return");
    }
    if let Some(total) = item_total {
        label.push_str(&format!(" · {} items", total));
    }
    label
}
