use chrono::NaiveDate;

use crate::{
    Axis, Convergence, ConvergenceLifecycle, EngineConfig, FnValueResolver, FrozenGrid,
    GridEngine, StaticBuckets, Target, Variable,
};

/// Freeze a minimal one-axis convergence and return the computed grid.
///
/// This helper is intended for documentation examples to avoid repetitive
/// setup.
///
/// # Example
///
/// ```rust
/// # use convergrid::doc_examples::freeze_regions;
/// let grid = freeze_regions(&["North", "South"])?;
/// assert_eq!(grid.row_count(), 2);
/// assert_eq!(grid.cells[0].value, Some(1.0));
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub fn freeze_regions(
    regions: &[&str],
) -> Result<FrozenGrid, Box<dyn std::error::Error + Send + Sync>> {
    let mut engine = GridEngine::new(
        StaticBuckets::new(),
        FnValueResolver::new(|_, _, _| Ok(1.0)),
        EngineConfig::default(),
    );

    let mut convergence = Convergence::new("doc", "doc example");
    convergence.push_variable(
        Axis::Y,
        Variable::FreeWalk {
            name: "region".into(),
            values: regions.iter().map(|r| r.to_string()).collect(),
        },
    );
    let target = Target::new("objective", "target");
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;

    let mut lifecycle = ConvergenceLifecycle::new();
    let grid = engine
        .freeze(&mut lifecycle, &mut convergence, &target, today)?
        .clone();
    Ok(grid)
}
