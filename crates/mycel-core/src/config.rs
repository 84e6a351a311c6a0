//! Growth configuration, colony specs, validation and error types.
//!
//! [`GrowthConfig`] carries the grid bounds and intensity constants shared by
//! every agent. [`validate()`](GrowthConfig::validate) checks structural
//! invariants before any agent is built; [`ColonySpec`] describes where one
//! agent starts and what it paints.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::cell::{Cell, ColorMode};
use crate::grid::Grid;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration or building agents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the axes is below [`Grid::MIN_DIM`].
    GridTooSmall {
        /// Configured column count.
        cols: u32,
        /// Configured row count.
        rows: u32,
    },
    /// An axis exceeds the maximum representable dimension.
    DimensionTooLarge {
        /// Which axis (`"cols"` or `"rows"`).
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
    /// `cols * rows` does not fit in `usize`.
    CellCountOverflow {
        /// Configured column count.
        cols: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Intensity constants violate an invariant.
    InvalidIntensity {
        /// Which invariant was violated.
        reason: String,
    },
    /// A colony's starting cell lies outside the grid.
    StartOutOfBounds {
        /// Index of the offending spec.
        agent: usize,
        /// The rejected cell.
        cell: Cell,
    },
    /// No colony specs were supplied.
    NoColonies,
    /// An agent thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { cols, rows } => write!(
                f,
                "grid {cols}x{rows} is too small, each axis needs at least {}",
                Grid::MIN_DIM
            ),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::CellCountOverflow { cols, rows } => {
                write!(f, "cell count of {cols}x{rows} grid overflows usize")
            }
            Self::InvalidIntensity { reason } => write!(f, "invalid intensity: {reason}"),
            Self::StartOutOfBounds { agent, cell } => {
                write!(f, "agent {agent} starts outside the grid at {cell}")
            }
            Self::NoColonies => write!(f, "at least one colony is required"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── GrowthConfig ───────────────────────────────────────────────────

/// Grid bounds and intensity constants shared by every agent of a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Grid width. Default: 1000.
    pub cols: u32,
    /// Grid height. Default: 1000.
    pub rows: u32,
    /// Intensity written to a cell on its first visit. Default: 32.
    pub base_intensity: u8,
    /// Increment applied on every later visit. Default: 16.
    pub intensity_step: u8,
    /// Saturation ceiling. Default: 255.
    pub max_intensity: u8,
    /// Pause at the end of every step. Zero means `yield_now` instead of a
    /// sleep. Default: 1 ms.
    pub step_delay: Duration,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            cols: 1000,
            rows: 1000,
            base_intensity: 32,
            intensity_step: 16,
            max_intensity: 255,
            step_delay: Duration::from_millis(1),
        }
    }
}

impl GrowthConfig {
    /// Default constants on a `cols × rows` grid.
    pub fn with_grid(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    ///
    /// The base intensity must be nonzero (zero marks an unclaimed cell)
    /// and no larger than the ceiling; the step must be nonzero so that
    /// revisits strictly grow until saturation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.base_intensity == 0 {
            return Err(ConfigError::InvalidIntensity {
                reason: "base_intensity must be nonzero".into(),
            });
        }
        if self.base_intensity > self.max_intensity {
            return Err(ConfigError::InvalidIntensity {
                reason: format!(
                    "base_intensity {} exceeds max_intensity {}",
                    self.base_intensity, self.max_intensity
                ),
            });
        }
        if self.intensity_step == 0 {
            return Err(ConfigError::InvalidIntensity {
                reason: "intensity_step must be nonzero".into(),
            });
        }
        Ok(())
    }

    /// The grid described by `cols` and `rows`.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.cols, self.rows)
    }

    /// The intensity a cell holds after one more visit.
    ///
    /// `current == 0` means unclaimed and yields the base value; otherwise
    /// the step is added and clamped to the ceiling.
    pub fn next_intensity(&self, current: u8) -> u8 {
        if current == 0 {
            self.base_intensity
        } else {
            current
                .saturating_add(self.intensity_step)
                .min(self.max_intensity)
        }
    }
}

// ── ColonySpec ─────────────────────────────────────────────────────

/// Where one colony starts and which palette it paints with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColonySpec {
    /// Starting cell. Must lie inside the grid.
    pub start: Cell,
    /// Palette.
    pub color: ColorMode,
}

impl ColonySpec {
    /// A colony starting at `start` painting with `color`.
    pub const fn new(start: Cell, color: ColorMode) -> Self {
        Self { start, color }
    }

    /// One colony in each corner: yellow top-left, red top-right, green
    /// bottom-left, blue bottom-right.
    pub fn four_corners(config: &GrowthConfig) -> Vec<ColonySpec> {
        let right = config.cols.saturating_sub(1) as i32;
        let bottom = config.rows.saturating_sub(1) as i32;
        vec![
            Self::new(Cell::new(0, 0), ColorMode::Yellow),
            Self::new(Cell::new(right, 0), ColorMode::Red),
            Self::new(Cell::new(0, bottom), ColorMode::Green),
            Self::new(Cell::new(right, bottom), ColorMode::Blue),
        ]
    }
}
