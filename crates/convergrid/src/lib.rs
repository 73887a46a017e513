//! Meta crate that re-exports the Convergrid building blocks with sensible
//! defaults. Downstream users can depend on this crate and opt into specific
//! layers via feature flags while keeping access to the underlying crates
//! when deeper integration is required.

#[cfg(feature = "common")]
pub use convergrid_common as common;

#[cfg(feature = "engine")]
pub use convergrid_engine as engine;

#[cfg(feature = "common")]
pub use convergrid_common::{
    Axis, AxisVariable, Bucket, BucketSegment, Convergence, GridError, GridErrorKind, Segment,
    Target, TimeGranularity, Variable,
};

#[cfg(feature = "engine")]
pub use convergrid_engine::{
    BucketProvider, CancellationToken, ConvergenceLifecycle, EngineConfig, FnValueResolver,
    FreezeState, FrozenGrid, GridCell, GridEngine, MatrixCell, StaticBuckets, ValueResolver,
};

#[cfg(feature = "engine")]
pub mod doc_examples;
