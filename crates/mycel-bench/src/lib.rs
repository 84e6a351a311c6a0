//! Shared fixtures for Mycel benchmarks.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use mycel_core::{Canvas, Cell, ColonySpec, ColorMode, GrowthConfig, Rgb};
use mycel_engine::{Agent, Habitat, IntensityMap, SharedRandom};

/// Canvas that discards every pixel.
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn set_pixel(&self, _x: u32, _y: u32, _color: Rgb) {}
}

/// The reference 1000x1000 configuration with no pause between steps.
pub fn reference_config() -> GrowthConfig {
    GrowthConfig {
        step_delay: Duration::ZERO,
        ..GrowthConfig::default()
    }
}

/// A seeded agent at the grid centre, painting nowhere.
pub fn centre_agent(config: &GrowthConfig, seed: u64) -> Agent {
    let map = IntensityMap::new(config).expect("benchmark config is valid");
    let habitat = Habitat::new(
        Arc::new(map),
        Arc::new(SharedRandom::seeded(seed)),
        Arc::new(NullCanvas),
    );
    let centre = Cell::new((config.cols / 2) as i32, (config.rows / 2) as i32);
    Agent::new(0, ColonySpec::new(centre, ColorMode::Green), habitat)
        .expect("centre lies inside the grid")
}
