//! Engine tuning knobs.

/// Configuration for a [`GridEngine`](crate::engine::GridEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fan matrix cell resolution out over a rayon pool. When `false` (or
    /// when pool construction fails) cells are resolved sequentially.
    pub enable_parallel: bool,
    /// Upper bound on pool threads. `None` lets rayon pick.
    pub max_threads: Option<usize>,
    /// Capacity of the engine-owned bucket cache.
    pub bucket_cache_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_parallel: true,
            max_threads: None,
            bucket_cache_cap: 64,
        }
    }
}
