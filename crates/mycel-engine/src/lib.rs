//! Concurrent growth engine for Mycel colonies.
//!
//! Provides the [`Agent`] step loop, the shared [`IntensityMap`], the
//! mutex-guarded [`SharedRandom`] generator, thread-safe canvas sinks, and
//! [`GrowthWorld`], which runs one thread per colony until told to stop (or
//! forever, if nobody asks).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod canvas;
pub mod intensity;
pub mod metrics;
pub mod random;
pub mod world;

pub use agent::{select_lowest, Agent, Habitat, StepOutcome};
pub use canvas::{ChannelCanvas, RasterCanvas};
pub use intensity::IntensityMap;
pub use metrics::{StepCounter, StopSignal};
pub use random::{shuffle, SharedRandom};
pub use world::{AgentFailure, GrowthWorld, ShutdownReport};
