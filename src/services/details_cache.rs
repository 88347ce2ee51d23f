use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use lru::LruCache;
use tokio::sync::RwLock;
use crate::models::restaurant_details::RestaurantDetails;

pub const DEFAULT_DETAILS_CACHE_CAPACITY: usize = 256;

struct CachedDetails {
    details: RestaurantDetails,
    stored_at: Instant,
}

/// Short-lived details cache keyed by place id. Bounded by `capacity`, least
/// recently used entries go first; entries older than `ttl` are dropped when
/// looked up.
pub struct DetailsCache {
    ttl: Duration,
    entries: RwLock<LruCache<String, CachedDetails>>,
}

impl DetailsCache {
    pub fn new(
        ttl: Duration,
        capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            ttl,
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub async fn get(
        &self,
        place_id: &str,
    ) -> Option<RestaurantDetails> {
        let mut entries = self.entries.write().await;
        let fresh = match entries.get(place_id) {
            Some(entry) => entry.stored_at.elapsed() < self.ttl,
            None => return None,
        };

        if fresh {
            entries.get(place_id).map(|entry| entry.details.clone())
        } else {
            entries.pop(place_id);
            None
        }
    }

    pub async fn insert(
        &self,
        place_id: String,
        details: RestaurantDetails,
    ) {
        self.entries.write().await.put(place_id, CachedDetails {
            details,
            stored_at: Instant::now(),
        });
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
