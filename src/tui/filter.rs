//! Status filter over resource actions.

use crate::model::Action;
use std::collections::BTreeSet;

/// Set of enabled actions. Empty means every resource is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    enabled: BTreeSet<Action>,
}

impl StatusFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any action is selected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.enabled.is_empty()
    }

    /// Whether a resource with this action passes the filter.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        self.enabled.is_empty() || self.enabled.contains(&action)
    }

    #[must_use]
    pub fn is_enabled(&self, action: Action) -> bool {
        self.enabled.contains(&action)
    }

    pub fn toggle(&mut self, action: Action) {
        if !self.enabled.remove(&action) {
            self.enabled.insert(action);
        }
    }

    pub fn enable_all(&mut self) {
        self.enabled.extend(Action::FILTERABLE);
    }

    pub fn clear(&mut self) {
        self.enabled.clear();
    }

    /// Enabled actions in picker order, for the status line.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        Action::FILTERABLE
            .iter()
            .filter(|a| self.enabled.contains(a))
            .map(|a| a.label())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_allows_everything() {
        let filter = StatusFilter::new();
        assert!(!filter.is_active());
        assert!(filter.allows(Action::Create));
        assert!(filter.allows(Action::NoOp));
    }

    #[test]
    fn test_toggle() {
        let mut filter = StatusFilter::new();
        filter.toggle(Action::Destroy);
        assert!(filter.allows(Action::Destroy));
        assert!(!filter.allows(Action::Create));
        filter.toggle(Action::Destroy);
        assert!(!filter.is_active());
        assert!(filter.allows(Action::Create));
    }

    #[test]
    fn test_enable_all_then_clear() {
        let mut filter = StatusFilter::new();
        filter.enable_all();
        assert_eq!(filter.labels().len(), 7);
        assert!(!filter.allows(Action::NoOp));
        filter.clear();
        assert!(filter.allows(Action::NoOp));
    }
}
