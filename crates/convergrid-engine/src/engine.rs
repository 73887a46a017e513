//! Convergence lifecycle and freeze orchestration.
//!
//! `Editable -> (freeze) -> Computing -> Computed -> (unfreeze) -> Editable`.
//! A freeze runs the whole pipeline (resolve variables, build both axis
//! trees, lay out both header regions, populate the matrix) and attaches the
//! result as transient state. Unfreezing discards only the computed
//! artifacts; the declarative variable list always survives.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use convergrid_common::{Axis, Convergence, GridError, GridErrorKind, Segment, Target, Variable};
use rayon::ThreadPoolBuilder;

use crate::cache::BucketCache;
use crate::config::EngineConfig;
use crate::layout::{GridCell, layout};
use crate::matrix::{MatrixCell, populate};
use crate::resolver::resolve_variable;
use crate::traits::{BucketProvider, ValueResolver};
use crate::tree::AxisTree;

/// Lifecycle states of one convergence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FreezeState {
    /// Variables may be added, removed, or reconfigured; no matrix exists.
    #[default]
    Editable,
    /// A freeze computation is in flight; edits are rejected.
    Computing,
    /// Grid and matrix are attached; edits are rejected until unfreeze.
    Computed,
}

/// The computed artifact of one freeze run: header geometry for both axes,
/// the populated matrix, and the resolved leaf lists the renderer labels
/// rows and columns with.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenGrid {
    pub x_tree: AxisTree,
    pub y_tree: AxisTree,
    pub x_cells: Vec<GridCell>,
    pub y_cells: Vec<GridCell>,
    pub x_leaves: Vec<Segment>,
    pub y_leaves: Vec<Segment>,
    pub cells: Vec<MatrixCell>,
}

impl FrozenGrid {
    pub fn row_count(&self) -> usize {
        self.y_leaves.len()
    }

    pub fn column_count(&self) -> usize {
        self.x_leaves.len()
    }

    /// The cell at a 0-based leaf coordinate, if inside the rectangle.
    pub fn value_at(&self, row: u32, column: u32) -> Option<&MatrixCell> {
        if (column as usize) >= self.column_count() {
            return None;
        }
        let idx = row as usize * self.column_count() + column as usize;
        self.cells.get(idx)
    }
}

/// Clonable handle for abandoning an in-flight freeze from another thread.
/// In-flight resolver calls run to completion; their results are discarded.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    fn as_flag(&self) -> &AtomicBool {
        &self.flag
    }
}

/// Per-convergence lifecycle: state, computed grid, and a generation counter
/// that fences stale results after an unfreeze.
#[derive(Debug, Default)]
pub struct ConvergenceLifecycle {
    state: FreezeState,
    generation: u64,
    grid: Option<FrozenGrid>,
}

impl ConvergenceLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FreezeState {
        self.state
    }

    pub fn grid(&self) -> Option<&FrozenGrid> {
        self.grid.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The engine: collaborator seams, tuning knobs, thread pool, bucket cache.
pub struct GridEngine<P, V> {
    buckets: P,
    values: V,
    pub config: EngineConfig,
    thread_pool: Option<Arc<rayon::ThreadPool>>,
    bucket_cache: BucketCache,
    cancel: CancellationToken,
}

impl<P, V> GridEngine<P, V>
where
    P: BucketProvider,
    V: ValueResolver,
{
    pub fn new(buckets: P, values: V, config: EngineConfig) -> Self {
        let thread_pool = if config.enable_parallel {
            let mut builder = ThreadPoolBuilder::new();
            if let Some(max_threads) = config.max_threads {
                builder = builder.num_threads(max_threads);
            }
            match builder.build() {
                Ok(pool) => Some(Arc::new(pool)),
                // Fall back to sequential population if pool creation fails.
                Err(_) => None,
            }
        } else {
            None
        };

        let bucket_cache = BucketCache::new(config.bucket_cache_cap);
        Self {
            buckets,
            values,
            config,
            thread_pool,
            bucket_cache,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle a host UI can use to abandon a freeze running on another
    /// thread. No cell write lands after the run is torn down.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Add a variable to an axis. Rejected outside `Editable`.
    pub fn add_variable(
        &self,
        lifecycle: &ConvergenceLifecycle,
        convergence: &mut Convergence,
        axis: Axis,
        variable: Variable,
    ) -> Result<(), GridError> {
        self.ensure_editable(lifecycle)?;
        convergence.push_variable(axis, variable);
        Ok(())
    }

    /// Remove the `index`-th variable of an axis. Rejected outside `Editable`.
    pub fn remove_variable(
        &self,
        lifecycle: &ConvergenceLifecycle,
        convergence: &mut Convergence,
        axis: Axis,
        index: usize,
    ) -> Result<Option<Variable>, GridError> {
        self.ensure_editable(lifecycle)?;
        Ok(convergence.remove_variable(axis, index))
    }

    /// Freeze: lock the definition and compute grid + matrix for `target`.
    ///
    /// `today` substitutes for missing time-frame anchors. A cancelled run
    /// restores `Editable` and attaches nothing.
    pub fn freeze<'l>(
        &mut self,
        lifecycle: &'l mut ConvergenceLifecycle,
        convergence: &mut Convergence,
        target: &Target,
        today: NaiveDate,
    ) -> Result<&'l FrozenGrid, GridError> {
        self.ensure_editable(lifecycle)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("freeze", convergence = %convergence.id).entered();

        lifecycle.state = FreezeState::Computing;
        lifecycle.generation += 1;
        let generation = lifecycle.generation;
        self.cancel.reset();

        let outcome = self.compute(convergence, target, today);

        match outcome {
            Ok(grid) if lifecycle.generation == generation && !self.cancel.is_cancelled() => {
                lifecycle.grid = Some(grid);
                lifecycle.state = FreezeState::Computed;
                convergence.frozen = true;
                // The borrow checker knows grid is Some here.
                Ok(lifecycle.grid.as_ref().unwrap())
            }
            Ok(_) => {
                // Superseded while computing: discard the stale result.
                lifecycle.state = FreezeState::Editable;
                Err(GridError::new(GridErrorKind::Cancelled)
                    .with_message("freeze superseded before completion"))
            }
            Err(e) => {
                lifecycle.state = FreezeState::Editable;
                Err(e)
            }
        }
    }

    /// Unfreeze: drop the computed artifacts, keep the variable definitions,
    /// and return to `Editable`. Bumps the generation so any still-running
    /// computation can no longer attach its result.
    pub fn unfreeze(
        &self,
        lifecycle: &mut ConvergenceLifecycle,
        convergence: &mut Convergence,
    ) -> Result<(), GridError> {
        match lifecycle.state {
            FreezeState::Editable => Ok(()),
            FreezeState::Computing | FreezeState::Computed => {
                self.cancel.cancel();
                lifecycle.generation += 1;
                lifecycle.grid = None;
                lifecycle.state = FreezeState::Editable;
                convergence.frozen = false;
                Ok(())
            }
        }
    }

    fn ensure_editable(&self, lifecycle: &ConvergenceLifecycle) -> Result<(), GridError> {
        match lifecycle.state {
            FreezeState::Editable => Ok(()),
            FreezeState::Computing => Err(GridError::new(GridErrorKind::Locked)
                .with_message("a freeze computation is in flight")),
            FreezeState::Computed => Err(GridError::new(GridErrorKind::Locked)
                .with_message("convergence is frozen; unfreeze before editing")),
        }
    }

    fn compute(
        &mut self,
        convergence: &Convergence,
        target: &Target,
        today: NaiveDate,
    ) -> Result<FrozenGrid, GridError> {
        let x_tree = self.build_axis(convergence, Axis::X, today);
        let y_tree = self.build_axis(convergence, Axis::Y, today);

        let x_leaves = x_tree.leaf_segments();
        let y_leaves = y_tree.leaf_segments();

        // The lead corner reserved for one axis's headers offsets the other.
        let x_cells = layout(&x_tree, Axis::X, y_tree.depth() as u32, y_tree.leaf_count() as u32);
        let y_cells = layout(&y_tree, Axis::Y, x_tree.depth() as u32, x_tree.leaf_count() as u32);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = y_leaves.len(),
            columns = x_leaves.len(),
            "populating matrix"
        );

        let cells = populate(
            &x_leaves,
            &y_leaves,
            target,
            &self.values,
            self.thread_pool.as_deref(),
            Some(self.cancel.as_flag()),
        )?;

        Ok(FrozenGrid {
            x_tree,
            y_tree,
            x_cells,
            y_cells,
            x_leaves,
            y_leaves,
            cells,
        })
    }

    fn build_axis(&mut self, convergence: &Convergence, axis: Axis, today: NaiveDate) -> AxisTree {
        let lists: Vec<Vec<Segment>> = convergence
            .variables_for(axis)
            .into_iter()
            .map(|variable| {
                resolve_variable(variable, &self.buckets, &mut self.bucket_cache, today)
            })
            .collect();
        AxisTree::build(&lists)
    }
}
