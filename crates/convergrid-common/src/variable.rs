//! Declarative axis variables.
//!
//! A `Variable` is the authored definition an axis is built from; the engine
//! resolves each one into an ordered list of [`Segment`](crate::Segment)s.
//! The three kinds are modeled as a closed sum type so resolver dispatch is
//! exhaustiveness-checked rather than inferred from field presence.

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two independent grid dimensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
}

/// Step unit for rolling time windows.
///
/// `Quarter`, `HalfYear`, and `Year` are month multiples and take part in
/// end-of-month snapping; `Day` and `Week` step by fixed day counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeGranularity {
    Day,
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl TimeGranularity {
    /// Step width in months for month-based granularities, `None` for the
    /// day-based ones.
    pub fn months_per_step(self) -> Option<u32> {
        match self {
            Self::Month => Some(1),
            Self::Quarter => Some(3),
            Self::HalfYear => Some(6),
            Self::Year => Some(12),
            Self::Day | Self::Week => None,
        }
    }

    /// Step width in days for day-based granularities, `None` otherwise.
    pub fn days_per_step(self) -> Option<u64> {
        match self {
            Self::Day => Some(1),
            Self::Week => Some(7),
            _ => None,
        }
    }
}

/// A declared axis variable, resolved into ordered segments by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Variable {
    /// A static, ordered list of free-form values.
    FreeWalk { name: String, values: Vec<String> },
    /// A reference to an externally-owned bucket (ordered named segments).
    Bucket { name: String, bucket_ref: String },
    /// A rolling window of consecutive date ranges ending at `anchor`.
    ///
    /// `anchor = None` means "the current date", supplied by the caller at
    /// resolve time. `occurrences` below 1 is clamped to 1.
    TimeFrame {
        name: String,
        granularity: TimeGranularity,
        anchor: Option<NaiveDate>,
        occurrences: u32,
    },
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Self::FreeWalk { name, .. }
            | Self::Bucket { name, .. }
            | Self::TimeFrame { name, .. } => name,
        }
    }
}

/// A variable together with the axis it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisVariable {
    pub axis: Axis,
    pub variable: Variable,
}

impl AxisVariable {
    pub fn new(axis: Axis, variable: Variable) -> Self {
        Self { axis, variable }
    }
}
