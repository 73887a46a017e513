//! Freeze-scoped cache for resolved buckets.

use convergrid_common::Bucket;
use rustc_hash::FxHashMap;

/// Bounded cache of fetched buckets, keyed by bucket id.
///
/// Owned by the engine and passed into the variable resolver; never implicit
/// module state. Only successful fetches are cached, so a bucket that shows
/// up mid-session is picked up by the next freeze.
pub struct BucketCache {
    cache: FxHashMap<String, Bucket>,
    entries_cap: usize,
}

impl BucketCache {
    pub fn new(entries_cap: usize) -> Self {
        Self {
            cache: FxHashMap::default(),
            entries_cap: entries_cap.max(1),
        }
    }

    pub fn get(&self, bucket_id: &str) -> Option<&Bucket> {
        self.cache.get(bucket_id)
    }

    pub fn insert(&mut self, bucket: Bucket) {
        // Simple capacity eviction: drop an arbitrary entry when full.
        if self.cache.len() >= self.entries_cap && !self.cache.contains_key(&bucket.id) {
            if let Some(first_key) = self.cache.keys().next().cloned() {
                self.cache.remove(&first_key);
            }
        }
        self.cache.insert(bucket.id.clone(), bucket);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convergrid_common::BucketSegment;

    fn bucket(id: &str) -> Bucket {
        Bucket::new(id, id, vec![BucketSegment::named("only")])
    }

    #[test]
    fn insert_and_get() {
        let mut cache = BucketCache::new(4);
        cache.insert(bucket("b-1"));
        assert!(cache.get("b-1").is_some());
        assert!(cache.get("b-2").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut cache = BucketCache::new(2);
        cache.insert(bucket("a"));
        cache.insert(bucket("b"));
        cache.insert(bucket("c"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reinsert_does_not_evict() {
        let mut cache = BucketCache::new(2);
        cache.insert(bucket("a"));
        cache.insert(bucket("b"));
        cache.insert(bucket("a"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_some());
    }
}
