//! Routing table: action identifier -> ordered listening sections

use std::collections::HashMap;

/// Ordered multimap from action identifier to section names
///
/// Each entry lists its sections in the order they registered interest,
/// which is the order a dispatch updates and notifies them in. An
/// (action, section) pair appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: HashMap<String, Vec<String>>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `section` to the listeners of `action`
    ///
    /// Returns `false` if the section was already listening.
    pub fn add(&mut self, action: &str, section: &str) -> bool {
        let listeners = self.routes.entry(action.to_string()).or_default();
        if listeners.iter().any(|name| name == section) {
            return false;
        }
        listeners.push(section.to_string());
        true
    }

    /// Sections listening to `action`, in registration order
    pub fn listeners(&self, action: &str) -> &[String] {
        self.routes
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Remove `section` from every entry, dropping entries left empty
    ///
    /// Returns the number of entries the section was removed from.
    pub fn remove_section(&mut self, section: &str) -> usize {
        let mut removed = 0;
        self.routes.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|name| name != section);
            removed += before - listeners.len();
            !listeners.is_empty()
        });
        removed
    }

    /// Action identifiers with at least one listener, sorted
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
