use crate::counter::{self, CounterMsg, CounterSnapshot, UsageCounter};
use crate::stats::{self, StatsCollector, StatsMsg, StatsSnapshot};
use crate::{
    eval_roles, has_wildcards, permute_resource, removed_roles, stat_roles, Access, IndexCache,
    PartRoles, RbacResult, Resolution, Role, RoleKind, Rule, RuleSet, Session, Trace,
};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Filter for rule storage lookups.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    pub role_id: Option<u64>,
    /// Exact resource references to match; empty matches any.
    pub resource: Vec<String>,
    pub operation: Option<String>,
}

impl RuleFilter {
    /// Matches everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches every rule of one role.
    #[must_use]
    pub fn for_role(role_id: u64) -> Self {
        Self {
            role_id: Some(role_id),
            ..Self::default()
        }
    }

    /// In-memory predicate equivalent of this filter; store
    /// implementations backed by a database translate it to a query
    /// instead.
    #[must_use]
    pub fn matches(&self, rule: &Rule) -> bool {
        if self.role_id.is_some_and(|role| rule.role_id != role) {
            return false;
        }

        if self
            .operation
            .as_ref()
            .is_some_and(|op| &rule.operation != op)
        {
            return false;
        }

        if !self.resource.is_empty() && !self.resource.iter().any(|r| *r == rule.resource) {
            return false;
        }

        true
    }
}

/// Persistence seam for rules.
pub trait RuleStore: Send + Sync {
    fn search_rules(&self, filter: &RuleFilter) -> RbacResult<Vec<Rule>>;
    fn upsert_rules(&self, rules: &[Rule]) -> RbacResult<()>;
    fn delete_rules(&self, rules: &[Rule]) -> RbacResult<()>;
}

/// Persistence seam for roles.
pub trait RoleStore: Send + Sync {
    fn search_roles(&self) -> RbacResult<Vec<Role>>;
}

/// Store that holds nothing; backs the noop service.
#[derive(Debug, Default)]
struct NullStore;

impl RuleStore for NullStore {
    fn search_rules(&self, _: &RuleFilter) -> RbacResult<Vec<Rule>> {
        Ok(Vec::new())
    }

    fn upsert_rules(&self, _: &[Rule]) -> RbacResult<()> {
        Ok(())
    }

    fn delete_rules(&self, _: &[Rule]) -> RbacResult<()> {
        Ok(())
    }
}

impl RoleStore for NullStore {
    fn search_roles(&self) -> RbacResult<Vec<Role>> {
        Ok(Vec::new())
    }
}

/// How the partial index is rebuilt on reindexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReindexStrategy {
    /// Clear the old index first, rebuild in place; memory stays flat
    /// but checks run uncached meanwhile.
    #[default]
    Memory,
    /// Build the replacement aside, then swap; checks stay fast but
    /// memory peaks at twice the index size.
    Speed,
}

/// Access-control service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on indexed role/resource combos; negative means
    /// unlimited. 0 normalizes to unlimited.
    pub max_index_size: isize,

    /// Routes counter and stats traffic through direct calls instead of
    /// channels; for deterministic tests, never for production.
    pub synchronous: bool,

    pub reindex_strategy: ReindexStrategy,

    /// Score multiplier the usage counter applies on decay.
    pub decay_factor: f64,
    /// Counter items scoring at or below this are evicted.
    pub evict_threshold: f64,

    /// Minimum idle time before a counter item decays.
    pub decay_interval: Duration,
    /// How often poorly scoring counter items are thrown out.
    pub cleanup_interval: Duration,
    /// How often the partial index is rebuilt from counter scores.
    pub reindex_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_index_size: -1,
            synchronous: false,
            reindex_strategy: ReindexStrategy::default(),
            decay_factor: 0.5,
            evict_threshold: 0.5,
            decay_interval: Duration::from_secs(5 * 60),
            cleanup_interval: Duration::from_secs(30 * 60),
            reindex_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    fn normalized(mut self) -> Self {
        if self.max_index_size == 0 {
            self.max_index_size = -1;
        }

        self
    }
}

#[derive(Default)]
struct Shared {
    roles: Vec<Role>,
    cache: IndexCache,
}

/// Combined service statistics.
#[derive(Debug, Clone)]
pub struct ServiceStats {
    pub cache: StatsSnapshot,
    pub counters: Vec<CounterSnapshot<String>>,
    pub index_size: usize,
}

/// The access-control service.
///
/// Holds the known roles, the partial in-memory rule index, the usage
/// counter steering what gets indexed, and the storage seams. All check
/// operations are synchronous; background maintenance (counter decay,
/// stats intake, periodic reindex) runs on Tokio tasks once
/// [`RbacService::start`] is called on a shared handle.
pub struct RbacService {
    cfg: Config,
    noop_access: Option<Access>,

    shared: RwLock<Shared>,
    counter: Arc<RwLock<UsageCounter<String>>>,
    stats: Arc<RwLock<StatsCollector>>,

    rule_store: Arc<dyn RuleStore>,
    role_store: Arc<dyn RoleStore>,

    counter_tx: OnceLock<mpsc::Sender<CounterMsg<String>>>,
    stats_tx: OnceLock<mpsc::Sender<StatsMsg>>,
}

impl RbacService {
    /// Creates a service: loads roles from the role store and starts
    /// with an empty index (preload via [`RbacService::preload_index`]).
    pub fn new(
        rule_store: Arc<dyn RuleStore>,
        role_store: Arc<dyn RoleStore>,
        cfg: Config,
    ) -> RbacResult<Self> {
        let cfg = cfg.normalized();
        let roles = role_store.search_roles()?;

        Ok(Self {
            counter: Arc::new(RwLock::new(UsageCounter::new(
                cfg.decay_factor,
                cfg.evict_threshold,
                cfg.decay_interval,
            ))),
            stats: Arc::new(RwLock::new(StatsCollector::new())),
            shared: RwLock::new(Shared {
                roles,
                cache: IndexCache::new(),
            }),
            rule_store,
            role_store,
            noop_access: None,
            counter_tx: OnceLock::new(),
            stats_tx: OnceLock::new(),
            cfg,
        })
    }

    /// A blank service answering every check with the given access;
    /// bootstrap and test seam.
    #[must_use]
    pub fn noop(access: Access) -> Self {
        let cfg = Config::default().normalized();

        Self {
            counter: Arc::new(RwLock::new(UsageCounter::new(
                cfg.decay_factor,
                cfg.evict_threshold,
                cfg.decay_interval,
            ))),
            stats: Arc::new(RwLock::new(StatsCollector::new())),
            shared: RwLock::new(Shared::default()),
            rule_store: Arc::new(NullStore),
            role_store: Arc::new(NullStore),
            noop_access: Some(access),
            counter_tx: OnceLock::new(),
            stats_tx: OnceLock::new(),
            cfg,
        }
    }

    /// Spawns the background maintenance tasks: counter decay/intake,
    /// stats intake, periodic counter cleanup and index rebuild. Call
    /// once, from within a Tokio runtime; tasks end when the service is
    /// dropped.
    pub fn start(self: &Arc<Self>) {
        let (counter_tx, counter_rx) = mpsc::channel(1024);
        let (stats_tx, stats_rx) = mpsc::channel(1024);

        if self.counter_tx.set(counter_tx).is_err() || self.stats_tx.set(stats_tx).is_err() {
            tracing::warn!("rbac service already started");
            return;
        }

        counter::watch(self.counter.clone(), counter_rx, |key: &String, role| {
            key.starts_with(&format!("{role}:"))
        });
        stats::watch(self.stats.clone(), stats_rx);

        let weak = Arc::downgrade(self);
        let cleanup_interval = self.cfg.cleanup_interval;
        let reindex_interval = self.cfg.reindex_interval;

        tokio::spawn(async move {
            let mut cleanup = tokio::time::interval(cleanup_interval);
            let mut reindex = tokio::time::interval(reindex_interval);
            cleanup.tick().await;
            reindex.tick().await;

            loop {
                tokio::select! {
                    _ = cleanup.tick() => {
                        let Some(svc) = weak.upgrade() else { break };
                        let evicted = svc
                            .counter
                            .write()
                            .expect("usage counter lock poisoned")
                            .evict();
                        tracing::debug!(evicted = evicted.len(), "counter cleanup");
                    }

                    _ = reindex.tick() => {
                        let Some(svc) = weak.upgrade() else { break };
                        if let Err(err) = svc.reindex() {
                            tracing::error!(error = %err, "reindex failed");
                        }
                    }
                }
            }
        });
    }

    // ── Checking ─────────────────────────────────────────────────

    /// True when the session may perform the operation on the resource.
    ///
    /// Check failures log and answer false.
    #[must_use]
    pub fn can(&self, session: &Session, operation: &str, resource: &str) -> bool {
        match self.check(session, operation, resource) {
            Ok(access) => access == Access::Allow,
            Err(err) => {
                tracing::error!(operation, resource, error = %err, "access check failed");
                false
            }
        }
    }

    /// Full evaluation of the session's access to the resource.
    ///
    /// Checks against wildcard resources cannot be answered and resolve
    /// to `Inherit`.
    pub fn check(&self, session: &Session, operation: &str, resource: &str) -> RbacResult<Access> {
        if let Some(access) = self.noop_access {
            tracing::debug!(%access, operation, resource, "noop access check");
            return Ok(access);
        }

        tracing::debug!(identity = session.identity(), operation, resource, "access check");

        if has_wildcards(resource) {
            return Ok(Access::Inherit);
        }

        let parts = {
            let shared = self.shared.read().expect("rbac state lock poisoned");
            eval_roles(session, resource, &shared.roles)
        };

        self.note_usage(&parts, resource);

        self.check_roles(&parts, operation, resource, None)
    }

    /// Like [`RbacService::check`], returning the full decision trace.
    pub fn trace(&self, session: &Session, operation: &str, resource: &str) -> RbacResult<Trace> {
        let mut t = Trace::new(resource, operation);

        if has_wildcards(resource) {
            // contextual membership cannot be resolved against a
            // wildcard, so the whole check stays unresolved
            let ctx_roles: Vec<u64> = {
                let shared = self.shared.read().expect("rbac state lock poisoned");
                shared
                    .roles
                    .iter()
                    .filter(|r| r.kind() == RoleKind::Context && session.is_member(r.id()))
                    .map(Role::id)
                    .collect()
            };

            if !ctx_roles.is_empty() {
                t.roles = ctx_roles;
                t.resolve(Access::Inherit, Some(Resolution::UnknownContext));
                return Ok(t);
            }
        }

        let parts = {
            let shared = self.shared.read().expect("rbac state lock poisoned");
            eval_roles(session, resource, &shared.roles)
        };

        self.check_roles(&parts, operation, resource, Some(&mut t))?;
        Ok(t)
    }

    fn check_roles(
        &self,
        parts: &PartRoles,
        operation: &str,
        resource: &str,
        mut trace: Option<&mut Trace>,
    ) -> RbacResult<Access> {
        if let Some(t) = trace.as_mut() {
            t.roles = parts.all_ids();
        }

        // preflight: states that bypass the standard flow
        if parts.has(RoleKind::Anonymous) && parts.kinds_present() > 1 {
            // anonymous membership excludes every other kind
            if let Some(t) = trace.as_mut() {
                t.resolve(Access::Deny, Some(Resolution::FailedIntegrityCheck));
            }
            return Ok(Access::Deny);
        }

        if parts.has(RoleKind::Bypass) {
            if let Some(t) = trace.as_mut() {
                t.resolve(Access::Allow, Some(Resolution::BypassMembership));
            }
            return Ok(Access::Allow);
        }

        let (indexed, unindexed) = self.segment_roles(parts, resource);
        self.log_cache_performance(&indexed, &unindexed, resource, operation);

        let (unindexed_rules, timing) = self.pull_unindexed(&unindexed, operation, resource)?;
        self.log_db_timing(timing);

        let shared = self.shared.read().expect("rbac state lock poisoned");
        let mut outcome = Access::Inherit;
        let mut index_time = Duration::ZERO;

        // priority order: the more niche the role kind, the stronger its
        // opinion; deny short-circuits within the deciding kind
        'kinds: for kind in RoleKind::CHECK_ORDER {
            if !parts.has(kind) {
                continue;
            }

            let mut allowed = false;

            for &role in parts.get(kind) {
                let mut candidates = RuleSet::default();

                let lookup = Instant::now();
                for rule in shared.cache.get(role, operation, resource) {
                    candidates.push(rule.clone());
                }
                index_time += lookup.elapsed();

                if let Some(stored) = unindexed_rules.get(&role) {
                    for rule in stored {
                        candidates.push(rule.clone());
                    }
                }

                let Some(effective) = candidates.effective().cloned() else {
                    continue;
                };

                if let Some(t) = trace.as_mut() {
                    t.rules.push(effective.clone());
                }

                match effective.access {
                    Access::Deny => {
                        outcome = Access::Deny;
                        break 'kinds;
                    }
                    Access::Allow => allowed = true,
                    Access::Inherit => {}
                }
            }

            if allowed {
                outcome = Access::Allow;
                break 'kinds;
            }
        }

        drop(shared);
        self.log_index_timing(index_time);

        if let Some(t) = trace.as_mut() {
            t.resolve(outcome, None);
            t.sort_rules();
        }

        Ok(outcome)
    }

    /// Splits the effective roles into index-answerable and
    /// storage-answerable partitions.
    fn segment_roles(&self, parts: &PartRoles, resource: &str) -> (PartRoles, PartRoles) {
        let shared = self.shared.read().expect("rbac state lock poisoned");

        if shared.cache.is_empty() {
            return (PartRoles::new(), parts.clone());
        }

        let mut indexed = PartRoles::new();
        let mut unindexed = PartRoles::new();

        for kind in RoleKind::ALL {
            for &role in parts.get(kind) {
                if shared.cache.is_indexed(role, resource) {
                    indexed.insert(kind, role);
                } else {
                    unindexed.insert(kind, role);
                }
            }
        }

        (indexed, unindexed)
    }

    /// Pulls rules for unindexed roles from storage, searching the
    /// resource and all its wildcard permutations.
    fn pull_unindexed(
        &self,
        unindexed: &PartRoles,
        operation: &str,
        resource: &str,
    ) -> RbacResult<(HashMap<u64, Vec<Rule>>, Duration)> {
        let started = Instant::now();
        let resources = permute_resource(resource);
        let mut out = HashMap::new();

        for kind in RoleKind::ALL {
            for &role in unindexed.get(kind) {
                let rules = self.rule_store.search_rules(&RuleFilter {
                    role_id: Some(role),
                    resource: resources.clone(),
                    operation: Some(operation.to_string()),
                })?;

                out.insert(role, rules);
            }
        }

        Ok((out, started.elapsed()))
    }

    // ── Granting ─────────────────────────────────────────────────

    /// Applies rules: updates the in-memory index where the combo is
    /// indexed and flushes everything to storage. Inheriting rules are
    /// deletes, the rest upserts.
    pub fn grant(&self, rules: Vec<Rule>) -> RbacResult<()> {
        for rule in &rules {
            tracing::debug!(%rule, "grant");
        }

        {
            let mut shared = self.shared.write().expect("rbac state lock poisoned");

            for rule in &rules {
                if !shared.cache.is_indexed(rule.role_id, &rule.resource) {
                    continue;
                }

                shared.cache.add(rule.role_id, &rule.resource, [rule.clone()]);
                self.stats
                    .write()
                    .expect("stats collector lock poisoned")
                    .cache_update(rule);
            }
        }

        self.flush(&rules)
    }

    fn flush(&self, rules: &[Rule]) -> RbacResult<()> {
        let (delete, upsert): (Vec<Rule>, Vec<Rule>) = rules
            .iter()
            .cloned()
            .partition(|r| r.access == Access::Inherit);

        self.rule_store.delete_rules(&delete)?;
        self.rule_store.upsert_rules(&upsert)?;

        tracing::debug!(deleted = delete.len(), upserted = upsert.len(), "flushed rules");
        Ok(())
    }

    // ── Roles ────────────────────────────────────────────────────

    /// Replaces the known roles, dropping counter entries of roles that
    /// went away.
    pub fn update_roles(&self, roles: Vec<Role>) {
        let removed: Vec<u64> = {
            let mut shared = self.shared.write().expect("rbac state lock poisoned");

            let counts = stat_roles(&roles);
            tracing::debug!(
                before = shared.roles.len(),
                after = roles.len(),
                bypass = counts[RoleKind::Bypass as usize],
                context = counts[RoleKind::Context as usize],
                common = counts[RoleKind::Common as usize],
                authenticated = counts[RoleKind::Authenticated as usize],
                anonymous = counts[RoleKind::Anonymous as usize],
                "updating roles",
            );

            let removed = removed_roles(&shared.roles, &roles)
                .into_iter()
                .map(Role::id)
                .collect();

            shared.roles = roles;
            removed
        };

        for role in removed {
            self.clean_counter_role(role);
        }
    }

    /// Reloads roles from the role store.
    pub fn reload_roles(&self) -> RbacResult<()> {
        let roles = self.role_store.search_roles()?;
        self.update_roles(roles);
        Ok(())
    }

    /// Forgets a single role.
    pub fn remove_role(&self, role_id: u64) {
        let mut shared = self.shared.write().expect("rbac state lock poisoned");
        shared.roles.retain(|r| r.id() != role_id);
    }

    /// Number of roles currently known.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.shared
            .read()
            .expect("rbac state lock poisoned")
            .roles
            .len()
    }

    // ── Rule access ──────────────────────────────────────────────

    /// Every stored rule.
    pub fn rules(&self) -> RbacResult<RuleSet> {
        Ok(RuleSet::new(self.rule_store.search_rules(&RuleFilter::any())?))
    }

    /// Every stored rule belonging to a role.
    pub fn find_rules_by_role(&self, role_id: u64) -> RbacResult<RuleSet> {
        Ok(RuleSet::new(
            self.rule_store.search_rules(&RuleFilter::for_role(role_id))?,
        ))
    }

    /// The (allowing, denying) roles holding an opinion on the resource
    /// and operation.
    pub fn significant_roles(
        &self,
        resource: &str,
        operation: &str,
    ) -> RbacResult<(Vec<u64>, Vec<u64>)> {
        let rules = RuleSet::new(self.rule_store.search_rules(&RuleFilter {
            resource: vec![resource.to_string()],
            operation: Some(operation.to_string()),
            role_id: None,
        })?);

        Ok(rules.significant_roles(resource, operation))
    }

    /// Copies every rule of the source role onto the targets, replacing
    /// whatever rules the targets had.
    pub fn clone_rules(&self, from_role: u64, to_roles: &[u64]) -> RbacResult<()> {
        let source = self.rule_store.search_rules(&RuleFilter::for_role(from_role))?;

        let mut updated = Vec::new();
        for &target in to_roles {
            let mut existing = self.rule_store.search_rules(&RuleFilter::for_role(target))?;
            for rule in &mut existing {
                rule.access = Access::Inherit;
            }
            updated.extend(existing);

            updated.extend(source.iter().map(|rule| {
                let mut cloned = rule.clone();
                cloned.role_id = target;
                cloned
            }));
        }

        self.grant(updated)
    }

    // ── Index management ─────────────────────────────────────────

    /// Number of indexed role/resource combos.
    #[must_use]
    pub fn index_size(&self) -> usize {
        self.shared
            .read()
            .expect("rbac state lock poisoned")
            .cache
            .size()
    }

    /// Adds rules directly to the in-memory index; debugging seam.
    pub fn index_rules(&self, role_id: u64, resource: &str, rules: Vec<Rule>) {
        let mut shared = self.shared.write().expect("rbac state lock poisoned");
        shared.cache.add(role_id, resource, rules);
    }

    /// Builds the index for the given `{role}:{resource}` combo keys,
    /// replacing the current one. Used to restore persisted index state
    /// on startup.
    pub fn preload_index(&self, keys: &[String]) -> RbacResult<()> {
        let cache = self.index_for_keys(keys)?;

        let mut shared = self.shared.write().expect("rbac state lock poisoned");
        shared.cache = cache;
        Ok(())
    }

    /// The indexed combo keys, for persisting index state.
    #[must_use]
    pub fn indexed_keys(&self) -> Vec<String> {
        self.shared
            .read()
            .expect("rbac state lock poisoned")
            .cache
            .keys()
    }

    /// Rebuilds the index from the counter's best performers, using the
    /// configured strategy.
    pub fn reindex(&self) -> RbacResult<()> {
        match self.cfg.reindex_strategy {
            ReindexStrategy::Memory => {
                {
                    let mut shared = self.shared.write().expect("rbac state lock poisoned");
                    shared.cache = IndexCache::new();
                }

                let cache = self.build_index()?;
                let mut shared = self.shared.write().expect("rbac state lock poisoned");
                shared.cache = cache;
            }
            ReindexStrategy::Speed => {
                let cache = self.build_index()?;
                let mut shared = self.shared.write().expect("rbac state lock poisoned");
                shared.cache = cache;
            }
        }

        Ok(())
    }

    fn build_index(&self) -> RbacResult<IndexCache> {
        let keys = self
            .counter
            .read()
            .expect("usage counter lock poisoned")
            .best_performers(self.cfg.max_index_size);

        self.index_for_keys(&keys)
    }

    fn index_for_keys(&self, keys: &[String]) -> RbacResult<IndexCache> {
        let mut cache = IndexCache::new();

        for key in keys {
            let Some((role, resource)) = key.split_once(':') else {
                continue;
            };
            let Ok(role) = role.parse::<u64>() else {
                continue;
            };

            let rules = self.rule_store.search_rules(&RuleFilter {
                role_id: Some(role),
                resource: permute_resource(resource),
                operation: None,
            })?;

            cache.add(role, resource, rules);
        }

        Ok(cache)
    }

    // ── Stats ────────────────────────────────────────────────────

    /// Combined service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            cache: self
                .stats
                .read()
                .expect("stats collector lock poisoned")
                .snapshot(),
            counters: self
                .counter
                .read()
                .expect("usage counter lock poisoned")
                .snapshot(),
            index_size: self.index_size(),
        }
    }

    // ── Async/sync plumbing ──────────────────────────────────────

    fn note_usage(&self, parts: &PartRoles, resource: &str) {
        for role in parts.all_ids() {
            let key = format!("{role}:{resource}");

            if !self.cfg.synchronous {
                if let Some(tx) = self.counter_tx.get() {
                    let _ = tx.try_send(CounterMsg::Inc(key));
                    continue;
                }
            }

            self.counter
                .write()
                .expect("usage counter lock poisoned")
                .inc(key);
        }
    }

    fn clean_counter_role(&self, role: u64) {
        if !self.cfg.synchronous {
            if let Some(tx) = self.counter_tx.get() {
                let _ = tx.try_send(CounterMsg::CleanRole(role));
                return;
            }
        }

        self.counter
            .write()
            .expect("usage counter lock poisoned")
            .clean_keys(|key: &String| key.starts_with(&format!("{role}:")));
    }

    fn log_cache_performance(
        &self,
        indexed: &PartRoles,
        unindexed: &PartRoles,
        resource: &str,
        operation: &str,
    ) {
        let hits = indexed.all_ids();
        let misses = unindexed.all_ids();

        if !self.cfg.synchronous {
            if let Some(tx) = self.stats_tx.get() {
                if !hits.is_empty() {
                    let _ = tx.try_send(StatsMsg::Hit {
                        roles: hits,
                        resource: resource.to_string(),
                        operation: operation.to_string(),
                    });
                }
                if !misses.is_empty() {
                    let _ = tx.try_send(StatsMsg::Miss {
                        roles: misses,
                        resource: resource.to_string(),
                        operation: operation.to_string(),
                    });
                }
                return;
            }
        }

        let mut stats = self.stats.write().expect("stats collector lock poisoned");
        if !hits.is_empty() {
            stats.cache_hit(&hits, resource, operation);
        }
        if !misses.is_empty() {
            stats.cache_miss(&misses, resource, operation);
        }
    }

    fn log_db_timing(&self, timing: Duration) {
        if !self.cfg.synchronous {
            if let Some(tx) = self.stats_tx.get() {
                let _ = tx.try_send(StatsMsg::DbTiming(timing));
                return;
            }
        }

        self.stats
            .write()
            .expect("stats collector lock poisoned")
            .db_timing(timing);
    }

    fn log_index_timing(&self, timing: Duration) {
        if !self.cfg.synchronous {
            if let Some(tx) = self.stats_tx.get() {
                let _ = tx.try_send(StatsMsg::IndexTiming(timing));
                return;
            }
        }

        self.stats
            .write()
            .expect("stats collector lock poisoned")
            .index_timing(timing);
    }
}
