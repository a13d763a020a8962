//! In-memory bearer token cache
//!
//! Tokens are keyed by credential identity (`"{base_url}:{client_id}"`) and
//! reused until their fixed TTL elapses. The cache is process-local: nothing
//! is persisted and a restart always re-authenticates.
//!
//! Generic over [`Clock`] so expiry can be driven by `MockClock` in tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use dentaloffice_common::time::{Clock, SystemClock};
use dentaloffice_domain::constants::DEFAULT_TOKEN_TTL_SECS;
use parking_lot::Mutex;
use tracing::warn;

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Shared token store. Wrap in `Arc` to share between clients.
///
/// The lock is held only for map access, never across an `.await`.
pub struct TokenCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<String, CachedToken>>,
    ttl: Duration,
    clock: C,
}

impl TokenCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl Default for TokenCache<SystemClock> {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TOKEN_TTL_SECS))
    }
}

impl<C: Clock> TokenCache<C> {
    /// Create a cache with a custom clock (for testing)
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Token for `key` if one is cached and still valid.
    ///
    /// Expired entries are dropped on lookup.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.token.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a freshly issued token, replacing any previous entry for `key`.
    ///
    /// A TTL too large to represent as an instant leaves the token uncached.
    pub fn store(&self, key: &str, token: impl Into<String>) {
        let Some(expires_at) = self.clock.now().checked_add(self.ttl) else {
            warn!(ttl_secs = self.ttl.as_secs(), "token TTL out of range; not caching token");
            self.entries.lock().remove(key);
            return;
        };
        self.entries
            .lock()
            .insert(key.to_string(), CachedToken { token: token.into(), expires_at });
    }

    /// Drop the entry for `key`. Returns whether one was present.
    pub fn evict(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use dentaloffice_common::time::MockClock;

    use super::*;

    const KEY: &str = "https://acme.example.com:client-1";

    #[test]
    fn returns_token_within_ttl() {
        let clock = MockClock::new();
        let cache = TokenCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.store(KEY, "tok-1");
        clock.advance(Duration::from_secs(59));

        assert_eq!(cache.get(KEY).as_deref(), Some("tok-1"));
    }

    #[test]
    fn expires_exactly_at_ttl() {
        let clock = MockClock::new();
        let cache = TokenCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.store(KEY, "tok-1");
        clock.advance(Duration::from_secs(60));

        assert_eq!(cache.get(KEY), None);
        assert!(cache.is_empty(), "expired entry should be dropped");
    }

    #[test]
    fn store_overwrites_and_evict_removes() {
        let cache = TokenCache::with_clock(Duration::from_secs(60), MockClock::new());

        cache.store(KEY, "tok-1");
        cache.store(KEY, "tok-2");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(KEY).as_deref(), Some("tok-2"));

        assert!(cache.evict(KEY));
        assert!(!cache.evict(KEY));
        assert_eq!(cache.get(KEY), None);
    }

    #[test]
    fn unrepresentable_ttl_does_not_panic() {
        let cache = TokenCache::with_clock(Duration::MAX, MockClock::new());

        cache.store(KEY, "tok-1");

        assert_eq!(cache.get(KEY), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let cache = TokenCache::with_clock(Duration::from_secs(60), MockClock::new());

        cache.store(KEY, "tok-1");
        cache.store("https://acme.example.com:client-2", "tok-2");
        cache.evict(KEY);

        assert_eq!(cache.get("https://acme.example.com:client-2").as_deref(), Some("tok-2"));
    }
}
