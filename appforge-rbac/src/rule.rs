use crate::Access;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One access-control rule: a role may (or may not) perform an operation
/// on a resource.
///
/// Resources are `prefix/seg/seg/...` references; trailing segments may
/// be the `*` wildcard, granting over a whole sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub role_id: u64,
    pub resource: String,
    pub operation: String,
    pub access: Access,
}

impl Rule {
    /// Creates a rule with the given access.
    #[must_use]
    pub fn new(
        role_id: u64,
        resource: impl Into<String>,
        operation: impl Into<String>,
        access: Access,
    ) -> Self {
        Self {
            role_id,
            resource: resource.into(),
            operation: operation.into(),
            access,
        }
    }

    /// Creates an allowing rule.
    #[must_use]
    pub fn allow(role_id: u64, resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(role_id, resource, operation, Access::Allow)
    }

    /// Creates a denying rule.
    #[must_use]
    pub fn deny(role_id: u64, resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(role_id, resource, operation, Access::Deny)
    }

    /// Creates an inheriting (no-opinion) rule; granting one removes any
    /// stored rule for the same combo.
    #[must_use]
    pub fn inherit(
        role_id: u64,
        resource: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self::new(role_id, resource, operation, Access::Inherit)
    }

    /// True when this rule applies to the given concrete resource and
    /// operation.
    #[must_use]
    pub fn matches(&self, resource: &str, operation: &str) -> bool {
        self.operation == operation && resource_matches(&self.resource, resource)
    }

    /// Specificity score; higher means more specific.
    ///
    /// Segments are weighted left-to-right: a wildcard late in the path
    /// costs less specificity than one early on, so `a/1/*` outranks
    /// `a/*/*` and any exact reference outranks both.
    #[must_use]
    pub fn specificity(&self) -> u64 {
        self.resource
            .split('/')
            .fold(0, |score, seg| (score << 1) | u64::from(seg != "*"))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} to {}",
            self.access, self.operation, self.resource, self.role_id
        )
    }
}

/// A set of rules with specificity-aware helpers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet(pub Vec<Rule>);

impl RuleSet {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self(rules)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    /// Orders the set most-specific-first.
    pub fn sort(&mut self) {
        self.0
            .sort_by(|a, b| b.specificity().cmp(&a.specificity()));
    }

    /// The rule that decides this set: the most specific one holding an
    /// opinion. `None` when every rule inherits.
    #[must_use]
    pub fn effective(&self) -> Option<&Rule> {
        let mut refs: Vec<&Rule> = self.0.iter().collect();
        refs.sort_by(|a, b| b.specificity().cmp(&a.specificity()));

        refs.into_iter().find(|r| r.access != Access::Inherit)
    }

    /// Splits the roles holding an opinion on the given resource and
    /// operation into (allowing, denying) role lists.
    #[must_use]
    pub fn significant_roles(&self, resource: &str, operation: &str) -> (Vec<u64>, Vec<u64>) {
        let mut allows = Vec::new();
        let mut denies = Vec::new();

        for r in &self.0 {
            if !r.matches(resource, operation) {
                continue;
            }

            match r.access {
                Access::Allow => allows.push(r.role_id),
                Access::Deny => denies.push(r.role_id),
                Access::Inherit => {}
            }
        }

        allows.sort_unstable();
        allows.dedup();
        denies.sort_unstable();
        denies.dedup();

        (allows, denies)
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self(rules)
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// True when the resource reference contains wildcard segments.
#[must_use]
pub fn has_wildcards(resource: &str) -> bool {
    resource.contains('*')
}

/// Segment-wise match of a rule resource (may hold wildcards) against a
/// concrete resource reference. Lengths must agree.
#[must_use]
pub fn resource_matches(pattern: &str, resource: &str) -> bool {
    let mut p = pattern.split('/');
    let mut r = resource.split('/');

    loop {
        match (p.next(), r.next()) {
            (None, None) => return true,
            (Some(ps), Some(rs)) if ps == "*" || ps == rs => {}
            _ => return false,
        }
    }
}

/// Returns the given resource reference followed by every lower
/// specificity level, wildcarding trailing segments one by one.
///
/// The first segment identifies the resource type and is never
/// wildcarded; segments that are already wildcards are skipped.
#[must_use]
pub fn permute_resource(resource: &str) -> Vec<String> {
    let mut out = vec![resource.to_string()];
    let mut segments: Vec<&str> = resource.split('/').collect();

    for i in (1..segments.len()).rev() {
        if segments[i] == "*" {
            continue;
        }

        segments[i] = "*";
        out.push(segments.join("/"));
    }

    out
}
