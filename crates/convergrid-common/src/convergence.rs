//! The convergence entity: a named, versioned set of axis variables plus the
//! targets whose values populate the matrix.
//!
//! Persistence is external; this struct is the read/write hand-off shape.
//! Computed grids are transient engine state and never live here; only the
//! `frozen` flag is reflected back onto the entity.

use crate::{Axis, AxisVariable, Variable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies which external indicator/objective a matrix run computes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Target {
    pub objective_ref: String,
    pub target_ref: String,
}

impl Target {
    pub fn new<S: Into<String>>(objective_ref: S, target_ref: S) -> Self {
        Self {
            objective_ref: objective_ref.into(),
            target_ref: target_ref.into(),
        }
    }
}

/// A declarative convergence definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Convergence {
    pub id: String,
    pub name: String,
    pub description: String,
    pub variables: Vec<AxisVariable>,
    pub targets: Vec<Target>,
    pub user_group_ids: Vec<String>,
    pub frozen: bool,
    pub version: u32,
}

impl Convergence {
    pub fn new<S: Into<String>>(id: S, name: S) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            variables: Vec::new(),
            targets: Vec::new(),
            user_group_ids: Vec::new(),
            frozen: false,
            version: 0,
        }
    }

    /// Variables assigned to one axis, in declaration order (outermost first).
    pub fn variables_for(&self, axis: Axis) -> Vec<&Variable> {
        self.variables
            .iter()
            .filter(|v| v.axis == axis)
            .map(|v| &v.variable)
            .collect()
    }

    /// Append a variable to an axis. Declaration order fixes nesting depth.
    pub fn push_variable(&mut self, axis: Axis, variable: Variable) {
        self.variables.push(AxisVariable::new(axis, variable));
        self.version += 1;
    }

    /// Remove the `index`-th variable of `axis` (index within that axis's
    /// list, not the combined one). Returns the removed variable if present.
    pub fn remove_variable(&mut self, axis: Axis, index: usize) -> Option<Variable> {
        let pos = self
            .variables
            .iter()
            .enumerate()
            .filter(|(_, v)| v.axis == axis)
            .map(|(i, _)| i)
            .nth(index)?;
        let removed = self.variables.remove(pos);
        self.version += 1;
        Some(removed.variable)
    }
}
