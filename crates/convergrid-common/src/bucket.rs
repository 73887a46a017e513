//! In-memory mirror of the externally-owned bucket entity.
//!
//! Buckets are authored and persisted elsewhere; the engine only reads them
//! through a provider seam, so these are plain data carriers. Segment order
//! is significant and preserved as authored.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One ordered segment of a bucket: a named category, optionally bounded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BucketSegment {
    pub name: String,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl BucketSegment {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            lower_bound: None,
            upper_bound: None,
        }
    }

    pub fn bounded<S: Into<String>>(name: S, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            lower_bound: Some(lower),
            upper_bound: Some(upper),
        }
    }
}

/// An externally-defined partition of a measure into ordered segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub segments: Vec<BucketSegment>,
}

impl Bucket {
    pub fn new<S: Into<String>>(id: S, name: S, segments: Vec<BucketSegment>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            segments,
        }
    }
}
