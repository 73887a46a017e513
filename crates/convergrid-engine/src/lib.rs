//! Multi-axis convergence grid engine.
//!
//! Turns a declarative set of axis variables (buckets, rolling time windows,
//! free-form value lists) into a merged-header grid layout and a populated
//! indicator matrix, one resolver call per cross-product cell. The engine is
//! a pure in-process computation module: buckets and indicator values come
//! in through the [`traits`] seams, and the surrounding application owns
//! persistence and rendering.

pub mod cache;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod layout;
pub mod matrix;
pub mod resolver;
pub mod traits;
pub mod tree;

pub use cache::BucketCache;
pub use config::EngineConfig;
pub use engine::{CancellationToken, ConvergenceLifecycle, FreezeState, FrozenGrid, GridEngine};
pub use layout::{GridCell, layout};
pub use matrix::{MatrixCell, populate};
pub use resolver::resolve_variable;
pub use traits::{BucketProvider, FnValueResolver, StaticBuckets, ValueResolver};
pub use tree::{AxisNode, AxisTree};
