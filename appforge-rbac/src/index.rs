use crate::Rule;
use std::collections::HashMap;

/// In-memory rule lookup structure.
///
/// Rules are keyed role → operation → resource segments, with `*` stored
/// as an ordinary segment key. A lookup walks both the exact and the
/// wildcard child at every level, so it returns every rule applying to a
/// concrete resource — including inheriting ones, which the caller may
/// still want for tracing.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    roles: HashMap<u64, HashMap<String, Node>>,
}

#[derive(Debug, Clone, Default)]
struct Node {
    rules: Vec<Rule>,
    children: HashMap<String, Node>,
}

impl RuleIndex {
    /// Builds an index over the given rules.
    #[must_use]
    pub fn build(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut ix = Self::default();
        ix.add(rules);
        ix
    }

    /// Inserts additional rules.
    pub fn add(&mut self, rules: impl IntoIterator<Item = Rule>) {
        for rule in rules {
            let root = self
                .roles
                .entry(rule.role_id)
                .or_default()
                .entry(rule.operation.clone())
                .or_default();

            let mut node = root;
            for seg in rule.resource.split('/') {
                node = node.children.entry(seg.to_string()).or_default();
            }

            node.rules.push(rule);
        }
    }

    /// Every indexed rule applying to the concrete resource, for the
    /// given role and operation.
    #[must_use]
    pub fn get(&self, role_id: u64, operation: &str, resource: &str) -> Vec<&Rule> {
        let Some(root) = self.roles.get(&role_id).and_then(|ops| ops.get(operation)) else {
            return Vec::new();
        };

        let mut frontier = vec![root];
        for seg in resource.split('/') {
            let mut next = Vec::with_capacity(frontier.len() * 2);

            for node in frontier {
                if let Some(exact) = node.children.get(seg) {
                    next.push(exact);
                }

                if seg != "*" {
                    if let Some(wild) = node.children.get("*") {
                        next.push(wild);
                    }
                }
            }

            if next.is_empty() {
                return Vec::new();
            }

            frontier = next;
        }

        frontier.into_iter().flat_map(|n| n.rules.iter()).collect()
    }

    /// True when the exact rule (all attributes equal) is indexed.
    #[must_use]
    pub fn has(&self, rule: &Rule) -> bool {
        let Some(root) = self
            .roles
            .get(&rule.role_id)
            .and_then(|ops| ops.get(&rule.operation))
        else {
            return false;
        };

        let mut node = root;
        for seg in rule.resource.split('/') {
            match node.children.get(seg) {
                Some(child) => node = child,
                None => return false,
            }
        }

        node.rules.contains(rule)
    }

    /// True when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
