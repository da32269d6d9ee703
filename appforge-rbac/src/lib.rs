//! Role-based access-control core for AppForge.
//!
//! Answers "may this session perform this operation on this resource"
//! from rules stored per role, with wildcard resource references and a
//! priority order across role kinds. Performance-sensitive pieces:
//! - [`RuleIndex`] — trie lookup over rules, wildcard-aware
//! - [`IndexCache`] — partial in-memory index over the hottest combos
//! - [`UsageCounter`] — decaying usage scores steering what is indexed
//! - [`StatsCollector`] — cache/timing telemetry with bounded history
//!
//! [`RbacService`] ties these together over pluggable [`RuleStore`] /
//! [`RoleStore`] persistence seams. Entities expose their reference
//! strings themselves (`"{type}:{id}"`, segments separated by `/`); this
//! crate only ever sees the strings.

mod access;
mod cache;
pub mod counter;
mod error;
mod index;
mod role;
mod rule;
mod service;
pub mod stats;
mod trace;

pub use access::Access;
pub use cache::IndexCache;
pub use counter::{CounterMsg, CounterSnapshot, UsageCounter};
pub use error::{RbacError, RbacResult};
pub use index::RuleIndex;
pub use role::{
    eval_roles, removed_roles, stat_roles, ContextCheck, PartRoles, Role, RoleKind, Session,
};
pub use rule::{has_wildcards, permute_resource, resource_matches, Rule, RuleSet};
pub use service::{
    Config, RbacService, ReindexStrategy, RuleFilter, RuleStore, RoleStore, ServiceStats,
};
pub use stats::{StatsCollector, StatsMsg, StatsSnapshot};
pub use trace::{Resolution, Trace};
