//! Variable resolution: one declared variable in, an ordered segment list out.
//!
//! Resolution fails soft by design. A blank or unknown bucket reference, a
//! provider error, or an empty free-walk list all resolve to zero segments;
//! the grid downstream shows an axis with fewer (or zero) leaves instead of
//! surfacing an error dialog.

use chrono::NaiveDate;
use convergrid_common::{Segment, Variable};

use crate::cache::BucketCache;
use crate::calendar::rolling_windows;
use crate::traits::BucketProvider;

/// Resolve one variable into its ordered leaf segments.
///
/// `today` substitutes for a missing time-frame anchor; it is the only
/// ambient input and is passed explicitly so resolution stays pure.
pub fn resolve_variable(
    variable: &Variable,
    provider: &dyn BucketProvider,
    cache: &mut BucketCache,
    today: NaiveDate,
) -> Vec<Segment> {
    match variable {
        Variable::FreeWalk { values, .. } => values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(Segment::labeled)
            .collect(),
        Variable::Bucket { bucket_ref, .. } => resolve_bucket(bucket_ref, provider, cache),
        Variable::TimeFrame {
            granularity,
            anchor,
            occurrences,
            ..
        } => rolling_windows(*granularity, anchor.unwrap_or(today), *occurrences),
    }
}

fn resolve_bucket(
    bucket_ref: &str,
    provider: &dyn BucketProvider,
    cache: &mut BucketCache,
) -> Vec<Segment> {
    let bucket_ref = bucket_ref.trim();
    if bucket_ref.is_empty() {
        return Vec::new();
    }

    if let Some(bucket) = cache.get(bucket_ref) {
        return bucket
            .segments
            .iter()
            .map(|s| Segment::labeled(&s.name))
            .collect();
    }

    match provider.fetch_bucket(bucket_ref) {
        Ok(Some(bucket)) => {
            let segments = bucket
                .segments
                .iter()
                .map(|s| Segment::labeled(&s.name))
                .collect();
            cache.insert(bucket);
            segments
        }
        Ok(None) => Vec::new(),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(bucket = bucket_ref, error = %_e, "bucket fetch failed; resolving to zero segments");
            Vec::new()
        }
    }
}
