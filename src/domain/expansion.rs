//! Expansion state: which location ids are shown with their children visible.

use std::collections::HashSet;

use itertools::Itertools;

/// Set of expanded node ids.
///
/// Keyed by location id, never by arena index, so the state stays valid
/// across forest rebuilds as long as ids are stable. Ids that no longer
/// exist are kept and simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current membership with `root_ids`.
    pub fn initialize<I, S>(&mut self, root_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded = root_ids.into_iter().map(Into::into).collect();
    }

    /// Flip `id`; returns `true` if it is expanded afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn expand_all<I, S>(&mut self, all_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initialize(all_ids);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        self.expanded.iter().map(String::as_str).sorted().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_id_when_toggled_twice_then_membership_restored() {
        let mut state = ExpansionState::new();
        state.initialize(["1", "8"]);
        let before = state.clone();

        assert!(!state.toggle("1"));
        assert!(state.toggle("1"));
        assert!(state.toggle("2"));
        assert!(!state.toggle("2"));

        assert_eq!(state, before);
    }

    #[test]
    fn given_seeded_state_when_initialized_again_then_replaces_membership() {
        let mut state = ExpansionState::new();
        state.initialize(["a", "b"]);

        state.initialize(vec!["c".to_string()]);

        assert_eq!(state.ids(), vec!["c"]);
    }

    #[test]
    fn given_expanded_ids_when_collapse_all_then_empty() {
        let mut state = ExpansionState::new();
        state.expand_all(["1", "2", "3"]);
        assert_eq!(state.len(), 3);

        state.collapse_all();

        assert!(state.is_empty());
        assert!(!state.is_expanded("1"));
    }

    #[test]
    fn given_expand_and_collapse_when_repeated_then_idempotent() {
        let mut state = ExpansionState::new();
        state.expand("x");
        state.expand("x");
        assert_eq!(state.len(), 1);

        state.collapse("x");
        state.collapse("x");
        assert!(state.is_empty());
    }
}
