use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use super::domain::SlotSearchResponse;

/// Identity of one computed response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub service_type_id: i64,
    pub business_unit_id: i64,
    pub postal_code: Option<String>,
    pub start_date: NaiveDate,
    pub days_to_load: u32,
}

struct CacheEntry {
    expires_at: Instant,
    response: SlotSearchResponse,
}

/// Short-lived memoization of whole responses. Entries are immutable once
/// stored and get replaced wholesale, so concurrent readers never observe a
/// partial write. Expired entries are swept on insert; there is no explicit
/// invalidation.
pub(crate) struct SlotCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl SlotCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<SlotSearchResponse> {
        let entries = self.entries.lock().expect("slot cache mutex poisoned");
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.response.clone())
    }

    pub(crate) fn store(&self, key: CacheKey, response: SlotSearchResponse) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("slot cache mutex poisoned");
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                expires_at: now + self.ttl,
                response,
            },
        );
    }
}
