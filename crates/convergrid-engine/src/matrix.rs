//! Matrix population: the cartesian product of axis leaves, one resolver
//! call per cell.
//!
//! Cell coordinates are purely positional: row `i`, column `j` always holds
//! the value for `(y_leaves[i], x_leaves[j])` regardless of resolver outcome,
//! so a re-run over the same leaf lists reproduces the same placement. Each
//! resolver call is independent: a failure marks its own cell and never
//! aborts the batch.

use std::sync::atomic::{AtomicBool, Ordering};

use convergrid_common::{GridError, GridErrorKind, Segment, Target};

use crate::traits::ValueResolver;

/// One populated matrix cell. `failed` cells keep `value = None` and render
/// downstream as "N/A", never as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    pub row: u32,
    pub column: u32,
    pub value: Option<f64>,
    pub failed: bool,
}

impl MatrixCell {
    fn resolved(row: u32, column: u32, outcome: Result<f64, GridError>) -> Self {
        match outcome {
            Ok(value) => Self {
                row,
                column,
                value: Some(value),
                failed: false,
            },
            Err(_) => Self {
                row,
                column,
                value: None,
                failed: true,
            },
        }
    }
}

/// Populate the full `y_leaves x x_leaves` rectangle in row-major order.
///
/// `pool` bounds the fan-out; `None` resolves sequentially. `cancel` is
/// polled between cells; a raised flag abandons the run with
/// [`GridErrorKind::Cancelled`] and no partial matrix escapes.
pub fn populate(
    x_leaves: &[Segment],
    y_leaves: &[Segment],
    target: &Target,
    resolver: &dyn ValueResolver,
    pool: Option<&rayon::ThreadPool>,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<MatrixCell>, GridError> {
    let pairs: Vec<(u32, u32)> = (0..y_leaves.len() as u32)
        .flat_map(|row| (0..x_leaves.len() as u32).map(move |column| (row, column)))
        .collect();

    match pool {
        Some(pool) => populate_parallel(pool, &pairs, x_leaves, y_leaves, target, resolver, cancel),
        None => populate_sequential(&pairs, x_leaves, y_leaves, target, resolver, cancel),
    }
}

fn cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn populate_sequential(
    pairs: &[(u32, u32)],
    x_leaves: &[Segment],
    y_leaves: &[Segment],
    target: &Target,
    resolver: &dyn ValueResolver,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<MatrixCell>, GridError> {
    let mut cells = Vec::with_capacity(pairs.len());
    for &(row, column) in pairs {
        if cancelled(cancel) {
            return Err(GridError::new(GridErrorKind::Cancelled)
                .with_message("matrix population cancelled"));
        }
        let outcome = resolver.resolve_value(
            target,
            &x_leaves[column as usize],
            &y_leaves[row as usize],
        );
        cells.push(MatrixCell::resolved(row, column, outcome));
    }
    Ok(cells)
}

/// Fan the cells out over the pool, then collect in submission order so the
/// row-major layout is preserved. Per-cell errors become `failed` cells
/// inside the map; only cancellation propagates as `Err`.
fn populate_parallel(
    pool: &rayon::ThreadPool,
    pairs: &[(u32, u32)],
    x_leaves: &[Segment],
    y_leaves: &[Segment],
    target: &Target,
    resolver: &dyn ValueResolver,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<MatrixCell>, GridError> {
    use rayon::prelude::*;

    if cancelled(cancel) {
        return Err(GridError::new(GridErrorKind::Cancelled)
            .with_message("matrix population cancelled before starting"));
    }

    pool.install(|| {
        pairs
            .par_iter()
            .map(|&(row, column)| {
                if cancelled(cancel) {
                    return Err(GridError::new(GridErrorKind::Cancelled)
                        .with_message("matrix population cancelled during fan-out"));
                }
                let outcome = resolver.resolve_value(
                    target,
                    &x_leaves[column as usize],
                    &y_leaves[row as usize],
                );
                Ok(MatrixCell::resolved(row, column, outcome))
            })
            .collect()
    })
}
