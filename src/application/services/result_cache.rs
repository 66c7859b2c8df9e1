use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::application::Clock;

struct CacheEntry<V> {
    value: V,
    expires_at_ms: u64,
}

/// Time-bounded memoization. Expired entries are dropped lazily on lookup.
pub struct ResultCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send> ResultCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now_millis();

        match entries.get(key) {
            Some(entry) if now < entry.expires_at_ms => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn set(&self, key: &str, value: V, ttl: Duration) {
        let expires_at_ms = self
            .clock
            .now_millis()
            .saturating_add(ttl.as_millis() as u64);
        self.entries.lock().await.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at_ms,
            },
        );
    }
}
