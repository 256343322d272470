//! Expanded/collapsed state of question cards.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandAction {
    Toggle(String),
}

/// Ids of the cards currently showing their details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    ids: HashSet<String>,
}

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(mut self, action: ExpandAction) -> Self {
        match action {
            ExpandAction::Toggle(id) => {
                if !self.ids.remove(&id) {
                    self.ids.insert(id);
                }
            }
        }
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(set: ExpandedSet, id: &str) -> ExpandedSet {
        set.reduce(ExpandAction::Toggle(id.to_string()))
    }

    #[test]
    fn test_toggle_twice_collapses() {
        let set = toggle(ExpandedSet::new(), "a");
        assert!(set.contains("a"));
        let set = toggle(set, "a");
        assert!(!set.contains("a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_expanding_one_card_keeps_others() {
        let set = toggle(toggle(ExpandedSet::new(), "a"), "b");
        assert!(set.contains("a"));
        assert!(set.contains("b"));
        assert_eq!(set.len(), 2);

        let set = toggle(set, "b");
        assert!(set.contains("a"));
        assert!(!set.contains("b"));
    }
}
