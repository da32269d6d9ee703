use crate::{Rule, RuleIndex};
use std::collections::HashSet;

/// Partial in-memory index over the hottest role/resource combos.
///
/// The `indexed` set records which `{role}:{resource}` combos are fully
/// held in memory — only concrete (max-level) resource references are
/// recorded. A combo that is not in the set must be answered from
/// storage instead.
#[derive(Debug, Clone, Default)]
pub struct IndexCache {
    index: RuleIndex,
    indexed: HashSet<String>,
}

impl IndexCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes rules under a role/resource combo.
    ///
    /// Concrete resources always index. A wildcard resource indexes only
    /// when some already-indexed combo falls under it (the rules then
    /// matter for indexed lookups); otherwise it is ignored and the
    /// return value is false.
    pub fn add(&mut self, role_id: u64, resource: &str, rules: impl IntoIterator<Item = Rule>) -> bool {
        if resource.contains('*') {
            self.add_wild(role_id, resource, rules)
        } else {
            self.add_plain(role_id, resource, rules)
        }
    }

    fn add_wild(&mut self, role_id: u64, resource: &str, rules: impl IntoIterator<Item = Rule>) -> bool {
        let key = Self::make_key(role_id, resource);

        if !self.indexed.iter().any(|k| k.starts_with(&key)) {
            return false;
        }

        self.index.add(rules);
        true
    }

    fn add_plain(&mut self, role_id: u64, resource: &str, rules: impl IntoIterator<Item = Rule>) -> bool {
        self.indexed.insert(Self::make_key(role_id, resource));
        self.index.add(rules);
        true
    }

    /// Indexed rules for the combo; empty when the combo is unindexed.
    #[must_use]
    pub fn get(&self, role_id: u64, operation: &str, resource: &str) -> Vec<&Rule> {
        self.index.get(role_id, operation, resource)
    }

    /// True when the combo is (or may be) answered from the index.
    ///
    /// Wildcard references always report true — the underlying lookups
    /// handle them — while concrete references must occur in the indexed
    /// set.
    #[must_use]
    pub fn is_indexed(&self, role_id: u64, resource: &str) -> bool {
        if resource.contains('*') {
            return true;
        }

        self.indexed.contains(&Self::make_key(role_id, resource))
    }

    /// The indexed combo keys, for state flushing.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.indexed.iter().cloned().collect()
    }

    /// Number of indexed combos.
    #[must_use]
    pub fn size(&self) -> usize {
        self.indexed.len()
    }

    /// True when no combo is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty()
    }

    /// Combo key: `{role}:{resource}` with any wildcard tail trimmed.
    fn make_key(role_id: u64, resource: &str) -> String {
        let prefix = resource
            .split_once('*')
            .map_or(resource, |(head, _)| head)
            .trim_end_matches('/');

        format!("{role_id}:{prefix}")
    }
}
