use crate::Rule;
use appforge_types::Circular;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;

/// How many recent hit/miss entries are retained.
const LAST_ENTRIES: usize = 10_000;
/// How many recent timings are retained.
const LAST_TIMINGS: usize = 500;

/// Tracks cache performance and storage/index timings for the
/// access-control service.
///
/// Ring buffers bound the memory spent on "last N" tracking.
#[derive(Debug)]
pub struct StatsCollector {
    cache_hits: u64,
    cache_misses: u64,
    cache_updates: u64,

    avg_db_timing: Duration,
    min_db_timing: Duration,
    max_db_timing: Duration,

    avg_index_timing: Duration,
    min_index_timing: Duration,
    max_index_timing: Duration,

    last_hits: Circular<String>,
    last_misses: Circular<String>,
    last_db_timings: Circular<Duration>,
    last_index_timings: Circular<Duration>,
}

/// Point-in-time view of the collected stats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_updates: u64,

    pub avg_db_timing: Duration,
    pub min_db_timing: Duration,
    pub max_db_timing: Duration,

    pub avg_index_timing: Duration,
    pub min_index_timing: Duration,
    pub max_index_timing: Duration,

    pub last_hits: Vec<String>,
    pub last_misses: Vec<String>,
    pub last_db_timings: Vec<Duration>,
    pub last_index_timings: Vec<Duration>,
}

impl StatsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_hits: 0,
            cache_misses: 0,
            cache_updates: 0,
            avg_db_timing: Duration::ZERO,
            min_db_timing: Duration::ZERO,
            max_db_timing: Duration::ZERO,
            avg_index_timing: Duration::ZERO,
            min_index_timing: Duration::ZERO,
            max_index_timing: Duration::ZERO,
            last_hits: Circular::new(LAST_ENTRIES),
            last_misses: Circular::new(LAST_ENTRIES),
            last_db_timings: Circular::new(LAST_TIMINGS),
            last_index_timings: Circular::new(LAST_TIMINGS),
        }
    }

    /// Records a storage round-trip duration.
    pub fn db_timing(&mut self, timing: Duration) {
        tracing::trace!(?timing, "rbac storage timing");

        self.avg_db_timing = (self.avg_db_timing + timing) / 2;

        if self.min_db_timing.is_zero() || timing < self.min_db_timing {
            self.min_db_timing = timing;
        }
        if timing > self.max_db_timing {
            self.max_db_timing = timing;
        }

        self.last_db_timings.push(timing);
    }

    /// Records an in-memory index lookup duration.
    pub fn index_timing(&mut self, timing: Duration) {
        tracing::trace!(?timing, "rbac index timing");

        self.avg_index_timing = (self.avg_index_timing + timing) / 2;

        if self.min_index_timing.is_zero() || timing < self.min_index_timing {
            self.min_index_timing = timing;
        }
        if timing > self.max_index_timing {
            self.max_index_timing = timing;
        }

        self.last_index_timings.push(timing);
    }

    /// Records roles answered from the in-memory index.
    pub fn cache_hit(&mut self, roles: &[u64], resource: &str, operation: &str) {
        tracing::trace!(?roles, resource, operation, "rbac cache hit");

        self.cache_hits += 1;
        self.last_hits.push(entry(roles, resource, operation));
    }

    /// Records roles that had to be answered from storage.
    pub fn cache_miss(&mut self, roles: &[u64], resource: &str, operation: &str) {
        tracing::trace!(?roles, resource, operation, "rbac cache miss");

        self.cache_misses += 1;
        self.last_misses.push(entry(roles, resource, operation));
    }

    /// Records a rule landing in the in-memory index.
    pub fn cache_update(&mut self, rule: &Rule) {
        tracing::trace!(%rule, "rbac cache update");

        self.cache_updates += 1;
    }

    /// Copies out the collected stats.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            cache_updates: self.cache_updates,
            avg_db_timing: self.avg_db_timing,
            min_db_timing: self.min_db_timing,
            max_db_timing: self.max_db_timing,
            avg_index_timing: self.avg_index_timing,
            min_index_timing: self.min_index_timing,
            max_index_timing: self.max_index_timing,
            last_hits: self.last_hits.to_vec(),
            last_misses: self.last_misses.to_vec(),
            last_db_timings: self.last_db_timings.to_vec(),
            last_index_timings: self.last_index_timings.to_vec(),
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(roles: &[u64], resource: &str, operation: &str) -> String {
    let mut roles = roles.to_vec();
    roles.sort_unstable();

    format!("{roles:?} {operation} {resource}")
}

/// Messages consumed by the stats watch loop.
#[derive(Debug)]
pub enum StatsMsg {
    Hit {
        roles: Vec<u64>,
        resource: String,
        operation: String,
    },
    Miss {
        roles: Vec<u64>,
        resource: String,
        operation: String,
    },
    DbTiming(Duration),
    IndexTiming(Duration),
}

/// Spawns the stats intake loop. Exits when the message channel closes.
pub fn watch(stats: Arc<RwLock<StatsCollector>>, mut rx: mpsc::Receiver<StatsMsg>) {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let mut guard = stats.write().expect("stats collector lock poisoned");

            match msg {
                StatsMsg::Hit {
                    roles,
                    resource,
                    operation,
                } => guard.cache_hit(&roles, &resource, &operation),
                StatsMsg::Miss {
                    roles,
                    resource,
                    operation,
                } => guard.cache_miss(&roles, &resource, &operation),
                StatsMsg::DbTiming(t) => guard.db_timing(t),
                StatsMsg::IndexTiming(t) => guard.index_timing(t),
            }
        }

        tracing::debug!("stats watch loop terminated");
    });
}
