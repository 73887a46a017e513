//! Resolved leaf values produced by the variable resolver.
//!
//! A `Segment` is one ordered leaf of an axis variable: a free-form label, a
//! bucket category, or a rolling date range. Date-range segments carry their
//! inclusive bounds so the external value resolver can scope its computation;
//! everything else is label-only.

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One resolved leaf value of an axis variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub label: String,
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
}

impl Segment {
    /// Label-only segment (free-walk values, bucket categories).
    pub fn labeled<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            range_start: None,
            range_end: None,
        }
    }

    /// Date-range segment with an inclusive `start..end` label.
    ///
    /// Single-day ranges print as one date.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        let label = if start == end {
            start.to_string()
        } else {
            format!("{start}..{end}")
        };
        Self {
            label,
            range_start: Some(start),
            range_end: Some(end),
        }
    }

    pub fn is_date_range(&self) -> bool {
        self.range_start.is_some() && self.range_end.is_some()
    }
}

impl From<&str> for Segment {
    fn from(label: &str) -> Self {
        Self::labeled(label)
    }
}

impl From<String> for Segment {
    fn from(label: String) -> Self {
        Self::labeled(label)
    }
}
