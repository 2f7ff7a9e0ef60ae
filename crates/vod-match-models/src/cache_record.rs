use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::ResolvedResource;

/// Envelope persisted in the key/value store: `{"time": <epoch ms>, "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheRecord {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    pub data: ResolvedResource,
}

impl CacheRecord {
    pub fn new(data: ResolvedResource, time: DateTime<Utc>) -> Self {
        Self { time, data }
    }

    /// A record is fresh while strictly less than `ttl` has elapsed since it was written
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.time < ttl
    }
}
