//! Mycel: concurrent fungus-growth agents painting onto a shared grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Mycel sub-crates. For most users, adding `mycel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use mycel::prelude::*;
//!
//! // One green colony in the middle of a 32×32 grid.
//! let config = GrowthConfig::with_grid(32, 32);
//! let map = Arc::new(IntensityMap::new(&config).unwrap());
//! let canvas = Arc::new(RasterCanvas::new(32, 32));
//! let habitat = Habitat::new(
//!     Arc::clone(&map),
//!     Arc::new(SharedRandom::seeded(42)),
//!     canvas.clone(),
//! );
//! let spec = ColonySpec::new(Cell::new(16, 16), ColorMode::Green);
//! let mut agent = Agent::new(0, spec, habitat).unwrap();
//!
//! // The first step always lands on an unclaimed neighbour.
//! let outcome = agent.step().unwrap();
//! assert_eq!(outcome.intensity, 32);
//! assert_eq!(map.get(outcome.cell), 32);
//! assert_eq!(canvas.painted_pixels(), 1);
//! ```
//!
//! For free-running colonies, one thread each, use
//! [`GrowthWorld::spawn`](engine::GrowthWorld::spawn) and stop them with
//! [`GrowthWorld::shutdown`](engine::GrowthWorld::shutdown).
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mycel-core` | Cells, grid, palettes, configuration, errors, seams |
//! | [`engine`] | `mycel-engine` | Intensity map, agents, random source, canvases, world |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and configuration (`mycel-core`).
///
/// Contains [`types::Cell`], [`types::Grid`], [`types::ColorMode`],
/// [`types::GrowthConfig`], and the two seams agents are built against:
/// [`types::Canvas`] and [`types::RandomSource`].
pub use mycel_core as types;

/// The growth engine (`mycel-engine`).
///
/// [`engine::Agent`] for stepping a single colony by hand,
/// [`engine::GrowthWorld`] for running colonies on their own threads.
pub use mycel_engine as engine;

/// Common imports for typical Mycel usage.
///
/// ```rust
/// use mycel::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use mycel_core::{
        Canvas, Cell, ColonySpec, ColorMode, Grid, GrowthConfig, RandomSource, Rgb,
    };

    // Errors
    pub use mycel_core::{ConfigError, GrowthError};

    // Engine
    pub use mycel_engine::{
        Agent, ChannelCanvas, GrowthWorld, Habitat, IntensityMap, RasterCanvas, SharedRandom,
        ShutdownReport, StopSignal,
    };
}
