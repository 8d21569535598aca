//! Freshness-bounded storage of last-known-good detection results.
//!
//! Keyed by the exact question string (case- and whitespace-sensitive, no
//! normalization). Entries expire lazily: a stale entry is deleted by the
//! read that finds it, never served. No size bound, no background sweep,
//! no persistence across restarts.

use crate::record::DetectionRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Freshness window before a cached result is recomputed
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    stored_at: Instant,
    record: DetectionRecord,
}

/// In-memory TTL cache shared by every concurrent `detect` call.
///
/// The mutex guards a plain map; it is only held for the lookup or insert
/// itself, never across an await point, so a read can never observe a
/// half-expired entry.
pub struct AnswerCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry for `question`.
    ///
    /// A hit comes back with `served_from_cache = true` and `elapsed_ms = 0`.
    /// A stale entry is removed and treated as absent. Absence is a valid
    /// outcome, not an error.
    pub fn get(&self, question: &str) -> Option<DetectionRecord> {
        let mut entries = self.entries.lock().unwrap();

        match entries.get(question) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                let mut record = entry.record.clone();
                record.served_from_cache = true;
                record.elapsed_ms = 0;
                Some(record)
            }
            Some(_) => {
                entries.remove(question);
                None
            }
            None => None,
        }
    }

    /// Store `record` for `question`, overwriting any existing entry.
    pub fn put(&self, question: &str, record: &DetectionRecord) {
        let mut stored = record.clone();
        stored.served_from_cache = false;

        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            question.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                record: stored,
            },
        );
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Label;

    fn record(question: &str, provider: &str, confidence: f64) -> DetectionRecord {
        DetectionRecord {
            question: question.to_string(),
            provider: provider.to_string(),
            confidence,
            label: Label::Human,
            elapsed_ms: 1200,
            served_from_cache: false,
        }
    }

    #[test]
    fn test_absent_key_is_none() {
        let cache = AnswerCache::new();
        assert!(cache.get("never stored").is_none());
    }

    #[test]
    fn test_fresh_hit_is_flagged_and_instant() {
        let cache = AnswerCache::new();
        cache.put("Q1", &record("Q1", "ModelA", 0.9));

        let hit = cache.get("Q1").expect("fresh entry should be served");
        assert!(hit.served_from_cache);
        assert_eq!(hit.elapsed_ms, 0);
        assert_eq!(hit.provider, "ModelA");
        assert_eq!(hit.confidence, 0.9);
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let cache = AnswerCache::new();
        cache.put("Q1", &record("Q1", "ModelA", 0.9));
        cache.put("Q1", &record("Q1", "ModelB", 0.7));

        let hit = cache.get("Q1").unwrap();
        assert_eq!(hit.provider, "ModelB");
        assert_eq!(hit.confidence, 0.7);
    }

    #[test]
    fn test_stale_entry_is_purged_not_served() {
        let cache = AnswerCache::with_ttl(Duration::from_millis(10));
        cache.put("Q1", &record("Q1", "ModelA", 0.9));

        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get("Q1").is_none());
        // Purged on that read, still absent afterwards
        assert!(cache.get("Q1").is_none());
    }

    #[test]
    fn test_key_is_exact_string_match() {
        let cache = AnswerCache::new();
        cache.put("Tell me about yourself", &record("Tell me about yourself", "ModelA", 0.9));

        assert!(cache.get("tell me about yourself").is_none());
        assert!(cache.get("Tell me about yourself ").is_none());
        assert!(cache.get("Tell me about yourself").is_some());
    }
}
