use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vod_match_models::{CacheRecord, CanonicalQuery, MediaType, ResolvedResource};
use vod_match_sources::KeyValueStore;

/// Resolved resources keyed by `<namespace>.<type>.<tmdb id>.<season>`
///
/// Records older than the TTL and records that no longer decode are
/// removed when read. Store failures are logged and behave like a miss.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>, ttl: std::time::Duration) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(24)),
        }
    }

    pub fn key(&self, media_type: MediaType, tmdb_id: &str, season: u32) -> String {
        format!("{}.{}.{}.{}", self.namespace, media_type, tmdb_id, season)
    }

    pub fn key_for(&self, query: &CanonicalQuery) -> String {
        self.key(query.media_type, &query.tmdb_id, query.season)
    }

    pub async fn get(&self, key: &str) -> Option<ResolvedResource> {
        self.get_at(key, Utc::now()).await
    }

    pub async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<ResolvedResource> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Cache miss: {}", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", key, e);
                return None;
            }
        };

        let record = match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Cache corruption detected for {}: {}. Deleting entry.", key, e);
                self.remove(key).await;
                return None;
            }
        };

        if record.is_fresh(now, self.ttl) {
            info!("Cache hit: {} ('{}')", key, record.data.title);
            Some(record.data)
        } else {
            debug!("Cache expired: {} (written {})", key, record.time);
            self.remove(key).await;
            None
        }
    }

    pub async fn set(&self, key: &str, resource: &ResolvedResource) {
        self.set_at(key, resource, Utc::now()).await
    }

    pub async fn set_at(&self, key: &str, resource: &ResolvedResource, now: DateTime<Utc>) {
        let record = CacheRecord::new(resource.clone(), now);
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode cache entry {}: {}", key, e);
                return;
            }
        };
        match self.store.set(key, json).await {
            Ok(()) => debug!("Cached {} ('{}')", key, resource.title),
            Err(e) => warn!("Failed to write cache entry {}: {}", key, e),
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!("Failed to delete cache entry {}: {}", key, e);
        }
    }
}
