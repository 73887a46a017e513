//! Collaborator seams supplied by the host application.
//!
//! The engine never owns business data: buckets come through
//! [`BucketProvider`] and indicator values through [`ValueResolver`]. Both
//! traits are object-safe and `Send + Sync` so the populator can fan cell
//! resolution out across threads.

use convergrid_common::{Bucket, GridError, Segment, Target};
use rustc_hash::FxHashMap;

/* ───────────────────────── BucketProvider ───────────────────────── */

/// Read access to externally-owned buckets, keyed by id.
pub trait BucketProvider: Send + Sync {
    /// Fetch a bucket definition. `Ok(None)` means "not found"; the resolver
    /// treats both `None` and `Err` as zero segments (fail soft).
    fn fetch_bucket(&self, bucket_id: &str) -> Result<Option<Bucket>, GridError>;
}

/// Fixed in-memory bucket set; the default provider for tests and embedders
/// that preload their definitions.
#[derive(Debug, Default, Clone)]
pub struct StaticBuckets {
    buckets: FxHashMap<String, Bucket>,
}

impl StaticBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.buckets.insert(bucket.id.clone(), bucket);
        self
    }

    pub fn insert(&mut self, bucket: Bucket) {
        self.buckets.insert(bucket.id.clone(), bucket);
    }
}

impl BucketProvider for StaticBuckets {
    fn fetch_bucket(&self, bucket_id: &str) -> Result<Option<Bucket>, GridError> {
        Ok(self.buckets.get(bucket_id).cloned())
    }
}

/* ───────────────────────── ValueResolver ────────────────────────── */

/// The opaque indicator computation, invoked once per matrix cell.
///
/// Implementations may perform I/O and may fail per call; a failure marks
/// that one cell and never aborts the batch.
pub trait ValueResolver: Send + Sync {
    fn resolve_value(
        &self,
        target: &Target,
        x_segment: &Segment,
        y_segment: &Segment,
    ) -> Result<f64, GridError>;
}

/// Closure-backed resolver, convenient for hosts and tests.
pub struct FnValueResolver<F>(F);

impl<F> FnValueResolver<F>
where
    F: Fn(&Target, &Segment, &Segment) -> Result<f64, GridError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ValueResolver for FnValueResolver<F>
where
    F: Fn(&Target, &Segment, &Segment) -> Result<f64, GridError> + Send + Sync,
{
    fn resolve_value(
        &self,
        target: &Target,
        x_segment: &Segment,
        y_segment: &Segment,
    ) -> Result<f64, GridError> {
        (self.0)(target, x_segment, y_segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convergrid_common::BucketSegment;

    #[test]
    fn static_buckets_lookup() {
        let provider = StaticBuckets::new().with_bucket(Bucket::new(
            "b-1",
            "size",
            vec![BucketSegment::named("small"), BucketSegment::named("large")],
        ));
        let found = provider.fetch_bucket("b-1").unwrap().unwrap();
        assert_eq!(found.segments.len(), 2);
        assert!(provider.fetch_bucket("missing").unwrap().is_none());
    }

    #[test]
    fn fn_resolver_delegates() {
        let resolver = FnValueResolver::new(|_t, x, y| Ok((x.label.len() + y.label.len()) as f64));
        let target = Target::new("obj", "t");
        let v = resolver
            .resolve_value(&target, &Segment::labeled("ab"), &Segment::labeled("c"))
            .unwrap();
        assert_eq!(v, 3.0);
    }
}
