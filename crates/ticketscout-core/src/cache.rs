//! In-memory caching for marketplace responses.
//!
//! Two lifetimes share one store:
//!
//! - **TTL scope**: survives across top-level operations until `expires_at`.
//!   Expired entries are evicted lazily, on the read that finds them stale.
//! - **Request scope**: de-duplicates calls inside one top-level operation and is
//!   emptied by [`CacheStore::clear_request_scope`] before the next one starts.
//!
//! Locks are synchronous and held only for map access, so cache calls never
//! suspend the calling task.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

/// Default lifetime of TTL-scoped entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Stable key for one logical operation and its normalized parameters.
///
/// Parameters are kept sorted, so insertion order never changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    operation: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.operation)?;
        for (name, value) in &self.params {
            write!(
                f,
                "|{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

#[derive(Debug)]
struct CacheInner {
    ttl_scope: HashMap<String, CacheEntry>,
    request_scope: HashMap<String, Value>,
    default_ttl: Duration,
}

impl CacheInner {
    fn new(default_ttl: Duration) -> Self {
        Self {
            ttl_scope: HashMap::new(),
            request_scope: HashMap::new(),
            default_ttl,
        }
    }

    fn get(&mut self, key: &str, now: Instant) -> Option<Value> {
        let live = self.ttl_scope.get(key)?.is_live(now);
        if live {
            return self.ttl_scope.get(key).map(|entry| entry.value.clone());
        }
        self.ttl_scope.remove(key);
        None
    }

    fn put(&mut self, key: String, value: Value, ttl_override: Option<Duration>, now: Instant) {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        self.ttl_scope.insert(
            key,
            CacheEntry {
                value,
                expires_at: now.checked_add(ttl),
            },
        );
    }
}

/// Shared two-scope cache. Cloning shares the underlying store.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<Mutex<CacheInner>>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl CacheStore {
    /// Create a new cache store with a default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::new(default_ttl))),
        }
    }

    /// Create a disabled cache. TTL writes become no-ops.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the TTL-scoped value for `key` if it has not expired.
    ///
    /// A read past expiry is a miss and discards the entry.
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let hit = self.lock().get(&key.to_string(), Instant::now());
        if hit.is_some() {
            debug!(operation = key.operation(), "ttl cache hit");
        }
        hit
    }

    /// Stores `value` under `key` for `ttl` (or the store default).
    ///
    /// If the cache is disabled (TTL is ZERO), this is a no-op.
    pub fn set(&self, key: &CacheKey, value: Value, ttl: Option<Duration>) {
        let mut store = self.lock();
        if store.default_ttl == Duration::ZERO {
            return;
        }
        store.put(key.to_string(), value, ttl, Instant::now());
    }

    pub fn get_request_scoped(&self, key: &CacheKey) -> Option<Value> {
        let hit = self.lock().request_scope.get(&key.to_string()).cloned();
        if hit.is_some() {
            debug!(operation = key.operation(), "request cache hit");
        }
        hit
    }

    pub fn set_request_scoped(&self, key: &CacheKey, value: Value) {
        self.lock().request_scope.insert(key.to_string(), value);
    }

    /// Drops every request-scoped entry. Called at the start of each top-level operation.
    pub fn clear_request_scope(&self) {
        self.lock().request_scope.clear();
    }

    /// Remove expired entries from the TTL scope.
    pub fn clear_expired(&self) {
        let now = Instant::now();
        self.lock().ttl_scope.retain(|_, entry| entry.is_live(now));
    }

    /// Number of TTL-scoped entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.lock().ttl_scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn request_scope_len(&self) -> usize {
        self.lock().request_scope.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_is_independent_of_parameter_order() {
        let first = CacheKey::new("list_events")
            .param("venue_id", "896")
            .param("occurs_at.gte", "2025-06-01");
        let second = CacheKey::new("list_events").params([
            ("occurs_at.gte", "2025-06-01"),
            ("venue_id", "896"),
        ]);

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(
            first.to_string(),
            "list_events|occurs_at.gte=2025-06-01|venue_id=896"
        );
    }

    #[test]
    fn keys_with_separators_in_values_do_not_collide() {
        let joined = CacheKey::new("search").param("q", "a|b=c");
        let split = CacheKey::new("search").param("q", "a").param("b", "c");
        assert_ne!(joined.to_string(), split.to_string());
    }

    #[test]
    fn test_cache_store_basic_operations() {
        let cache = CacheStore::new(Duration::from_secs(1));
        let key = CacheKey::new("get_event").param("id", "1");

        assert!(cache.get(&key).is_none());

        cache.set(&key, json!({"id": 1}), None);
        assert_eq!(cache.get(&key), Some(json!({"id": 1})));

        cache.set(&key, json!({"id": 2}), None);
        assert_eq!(cache.get(&key), Some(json!({"id": 2})));
    }

    #[tokio::test]
    async fn test_cache_expiration_evicts_on_read() {
        let cache = CacheStore::new(Duration::from_millis(100));
        let key = CacheKey::new("list_events").param("venue_id", "7");

        cache.set(&key, json!([1, 2]), None);
        assert_eq!(cache.get(&key), Some(json!([1, 2])));
        assert_eq!(cache.len(), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get(&key).is_none());
        assert_eq!(cache.len(), 0, "stale entry is discarded by the read");
    }

    #[tokio::test]
    async fn test_cache_ttl_override() {
        let cache = CacheStore::new(Duration::from_secs(60));
        let key = CacheKey::new("search_events").param("q", "mets");

        cache.set(&key, json!("short"), Some(Duration::from_millis(100)));
        assert!(cache.get(&key).is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn disabled_cache_never_stores_ttl_entries() {
        let cache = CacheStore::disabled();
        let key = CacheKey::new("list_events");

        cache.set(&key, json!(1), None);
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn request_scope_is_cleared_between_operations() {
        let cache = CacheStore::default();
        let key = CacheKey::new("listings").param("event_id", "42");

        cache.set_request_scoped(&key, json!({"ticket_groups": []}));
        assert!(cache.get_request_scoped(&key).is_some());
        assert!(cache.get(&key).is_none(), "scopes do not share entries");

        cache.clear_request_scope();
        assert!(cache.get_request_scoped(&key).is_none());
        assert_eq!(cache.request_scope_len(), 0);
    }

    #[test]
    fn clearing_request_scope_keeps_ttl_entries() {
        let cache = CacheStore::default();
        let key = CacheKey::new("list_events").param("performer_id", "15");

        cache.set(&key, json!({"events": []}), None);
        cache.clear_request_scope();
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn clones_share_the_same_store() {
        let cache = CacheStore::default();
        let shared = cache.clone();
        let key = CacheKey::new("get_event").param("id", "9");

        shared.set_request_scoped(&key, json!(9));
        assert_eq!(cache.get_request_scoped(&key), Some(json!(9)));
    }
}
