//! Runtime errors raised by growth agents.
//!
//! Every variant is an invariant violation: the agent that hits one stops
//! rather than continuing on a corrupted position.

use std::error::Error;
use std::fmt;

use crate::cell::Cell;

/// Errors from a single growth step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrowthError {
    /// Candidate generation produced no in-bounds neighbour.
    NoCandidates {
        /// The cell the agent was standing on.
        cell: Cell,
    },
    /// A cell outside the grid reached the intensity update.
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid width.
        cols: u32,
        /// Grid height.
        rows: u32,
    },
}

impl fmt::Display for GrowthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates { cell } => {
                write!(f, "no in-bounds neighbour around {cell}")
            }
            Self::CellOutOfBounds { cell, cols, rows } => {
                write!(f, "cell {cell} outside {cols}x{rows} grid")
            }
        }
    }
}

impl Error for GrowthError {}
