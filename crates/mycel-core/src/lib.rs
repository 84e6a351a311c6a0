//! Core types and traits for the Mycel growth simulation.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! grid topology, cell and color types, the configuration surface, error
//! types, and the two seams every agent is wired to: the [`Canvas`] paint
//! sink and the shared [`RandomSource`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod canvas;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod random;

pub use canvas::{Canvas, PaintCommand};
pub use cell::{Cell, ColorMode, Rgb};
pub use config::{ColonySpec, ConfigError, GrowthConfig};
pub use error::GrowthError;
pub use grid::{Grid, Neighbours};
pub use random::RandomSource;
