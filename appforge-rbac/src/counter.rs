use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Scores how often each key is used, with periodic decay and eviction.
///
/// Drives the partial index: the best performers are the combos worth
/// keeping in memory. Scores start at 1, gain 1 per access, and are
/// multiplied by the decay factor once the item has been idle past the
/// decay interval.
#[derive(Debug)]
pub struct UsageCounter<K> {
    index: HashMap<K, CounterItem>,

    /// Items scoring at or below this are thrown out by [`Self::evict`].
    evict_threshold: f64,
    /// Score multiplier applied by decay; 1 preserves, 0 erases.
    decay_factor: f64,
    /// Minimum idle time before an item decays.
    decay_interval: Duration,
}

#[derive(Debug, Clone, Copy)]
struct CounterItem {
    score: f64,
    added: Instant,
    last_scored: Instant,
    last_access: Instant,
}

/// Point-in-time view of one counted item.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSnapshot<K> {
    pub key: K,
    pub score: f64,
    /// Time since the item entered the counter.
    pub age: Duration,
    /// Time since the item was last accessed.
    pub idle: Duration,
}

impl<K: Eq + Hash + Clone> UsageCounter<K> {
    #[must_use]
    pub fn new(decay_factor: f64, evict_threshold: f64, decay_interval: Duration) -> Self {
        Self {
            index: HashMap::new(),
            evict_threshold,
            decay_factor,
            decay_interval,
        }
    }

    /// Notes an access: new keys score 1, existing keys gain 1.
    pub fn inc(&mut self, key: K) {
        let now = Instant::now();

        self.index
            .entry(key)
            .and_modify(|item| {
                item.score += 1.0;
                item.last_scored = now;
                item.last_access = now;
            })
            .or_insert(CounterItem {
                score: 1.0,
                added: now,
                last_scored: now,
                last_access: now,
            });
    }

    /// Applies the decay factor to every item idle past the decay
    /// interval.
    pub fn decay(&mut self) {
        let now = Instant::now();

        for item in self.index.values_mut() {
            if now.duration_since(item.last_access) < self.decay_interval {
                continue;
            }

            item.score *= self.decay_factor;
            item.last_scored = now;
        }
    }

    /// Removes items scoring at or below the eviction threshold,
    /// returning the evicted keys.
    pub fn evict(&mut self) -> Vec<K> {
        let out: Vec<K> = self
            .index
            .iter()
            .filter(|(_, item)| item.score <= self.evict_threshold)
            .map(|(k, _)| k.clone())
            .collect();

        for k in &out {
            self.index.remove(k);
        }

        out
    }

    /// Removes every key the predicate claims.
    pub fn clean_keys(&mut self, belongs: impl Fn(&K) -> bool) {
        self.index.retain(|k, _| !belongs(k));
    }

    /// The top `n` keys by score. Negative `n` returns all, 0 none.
    #[must_use]
    pub fn best_performers(&self, n: isize) -> Vec<K> {
        self.performers(n, true)
    }

    /// The bottom `n` keys by score. Negative `n` returns all, 0 none.
    #[must_use]
    pub fn worst_performers(&self, n: isize) -> Vec<K> {
        self.performers(n, false)
    }

    fn performers(&self, n: isize, best_first: bool) -> Vec<K> {
        if n == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(&K, f64)> = self.index.iter().map(|(k, v)| (k, v.score)).collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        if best_first {
            scored.reverse();
        }

        let limit = if n < 0 { scored.len() } else { n as usize };

        scored.into_iter().take(limit).map(|(k, _)| k.clone()).collect()
    }

    /// Current score of a key, when counted.
    #[must_use]
    pub fn score(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|item| item.score)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Snapshot of every counted item.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CounterSnapshot<K>> {
        let now = Instant::now();

        self.index
            .iter()
            .map(|(k, item)| CounterSnapshot {
                key: k.clone(),
                score: item.score,
                age: now.duration_since(item.added),
                idle: now.duration_since(item.last_access),
            })
            .collect()
    }
}

/// Messages consumed by the counter watch loop.
#[derive(Debug)]
pub enum CounterMsg<K> {
    /// Note an access to a key.
    Inc(K),
    /// Drop every key the service maps to this role.
    CleanRole(u64),
}

/// Spawns the maintenance loop: consumes counter messages and runs decay
/// on the decay interval. Exits when the message channel closes.
///
/// `role_key` decides whether a key belongs to a role, for
/// [`CounterMsg::CleanRole`] handling.
pub fn watch<K>(
    counter: Arc<RwLock<UsageCounter<K>>>,
    mut rx: mpsc::Receiver<CounterMsg<K>>,
    role_key: impl Fn(&K, u64) -> bool + Send + Sync + 'static,
) where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    let interval = {
        let guard = counter.read().expect("usage counter lock poisoned");
        assert!(
            !guard.decay_interval.is_zero(),
            "counter decay interval must be non-zero"
        );
        guard.decay_interval
    };

    tokio::spawn(async move {
        let mut tick = tokio::time::interval(interval);
        // the first tick fires immediately; skip it so decay waits a full
        // interval
        tick.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    counter.write().expect("usage counter lock poisoned").decay();
                }

                msg = rx.recv() => match msg {
                    Some(CounterMsg::Inc(key)) => {
                        counter.write().expect("usage counter lock poisoned").inc(key);
                    }
                    Some(CounterMsg::CleanRole(role)) => {
                        counter
                            .write()
                            .expect("usage counter lock poisoned")
                            .clean_keys(|k| role_key(k, role));
                    }
                    None => break,
                },
            }
        }

        tracing::debug!("usage counter watch loop terminated");
    });
}
