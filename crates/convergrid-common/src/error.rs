//! Engine error representation, shared by the resolver, the layout planner,
//! and the lifecycle state machine.
//!
//! - **`GridErrorKind`** : the canonical set of engine error codes
//! - **`GridError`**     : kind + optional human-readable message
//!
//! Most error kinds are recovered locally (a bucket that fails to resolve
//! contributes zero segments, a failed cell is flagged and left null); the
//! struct exists so the few hard failures carry a stable code the host can
//! match on. When a future error needs its own payload, add a variant and a
//! field; existing code does not break.

use std::{error::Error, fmt};

/// All recognised engine error codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GridErrorKind {
    /// A referenced bucket could not be fetched, or the reference was blank.
    Resolution,
    /// The external value resolver failed for one matrix cell.
    Cell,
    /// A variable carried an invalid configuration the engine could not clamp.
    Config,
    /// A mutation was attempted while a freeze computation was in flight.
    Locked,
    /// The computation was abandoned before completion.
    Cancelled,
}

impl fmt::Display for GridErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolution => "#RESOLUTION",
            Self::Cell => "#CELL",
            Self::Config => "#CONFIG",
            Self::Locked => "#LOCKED",
            Self::Cancelled => "#CANCELLED",
        })
    }
}

/// The single error struct the engine API passes around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridError {
    pub kind: GridErrorKind,
    pub message: Option<String>,
}

impl From<GridErrorKind> for GridError {
    fn from(kind: GridErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

impl GridError {
    /// Basic constructor (no message).
    pub fn new(kind: GridErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == GridErrorKind::Cancelled
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl Error for GridError {}

impl From<GridError> for String {
    fn from(error: GridError) -> Self {
        format!("{error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = GridError::new(GridErrorKind::Resolution).with_message("bucket b-7 not found");
        assert_eq!(err.to_string(), "#RESOLUTION: bucket b-7 not found");
        assert_eq!(GridError::new(GridErrorKind::Locked).to_string(), "#LOCKED");
    }

    #[test]
    fn cancelled_predicate() {
        assert!(GridError::new(GridErrorKind::Cancelled).is_cancelled());
        assert!(!GridError::new(GridErrorKind::Cell).is_cancelled());
    }
}
