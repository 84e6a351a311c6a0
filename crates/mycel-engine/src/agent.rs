//! A single growth agent and its step loop.
//!
//! Each step:
//! 1. collects the in-bounds king-move neighbours of the current cell,
//! 2. shuffles them through the shared [`RandomSource`],
//! 3. moves to the first one with the lowest intensity,
//! 4. bumps that cell in the [`IntensityMap`],
//! 5. paints it with the agent's [`ColorMode`] at the new intensity.
//!
//! The shuffle exists only to break ties: `select_lowest` keeps the first
//! minimum it meets, so without it equal cells would always resolve the
//! same way.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mycel_core::{
    Canvas, Cell, ColonySpec, ColorMode, ConfigError, GrowthError, Neighbours, RandomSource, Rgb,
};
use tracing::{debug, error};

use crate::intensity::IntensityMap;
use crate::metrics::{StepCounter, StopSignal};
use crate::random::shuffle;

/// The shared resources every agent of a world is bound to.
#[derive(Clone)]
pub struct Habitat {
    /// Growth ledger.
    pub map: Arc<IntensityMap>,
    /// Draws for the tie-breaking shuffle.
    pub rng: Arc<dyn RandomSource>,
    /// Paint sink.
    pub canvas: Arc<dyn Canvas>,
}

impl Habitat {
    /// Bundle the three shared resources.
    pub fn new(
        map: Arc<IntensityMap>,
        rng: Arc<dyn RandomSource>,
        canvas: Arc<dyn Canvas>,
    ) -> Self {
        Self { map, rng, canvas }
    }
}

/// What one step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// The cell the agent moved to.
    pub cell: Cell,
    /// That cell's intensity after the visit.
    pub intensity: u8,
    /// The color painted there.
    pub color: Rgb,
}

/// One colony: a position, a palette, and a handle on the habitat.
pub struct Agent {
    id: usize,
    position: Cell,
    color: ColorMode,
    habitat: Habitat,
    steps: Arc<StepCounter>,
}

impl Agent {
    /// Build agent `id` from its spec.
    ///
    /// Returns `Err(ConfigError::StartOutOfBounds)` if the start cell lies
    /// outside the habitat's grid.
    pub fn new(id: usize, spec: ColonySpec, habitat: Habitat) -> Result<Self, ConfigError> {
        if !habitat.map.grid().contains(spec.start) {
            return Err(ConfigError::StartOutOfBounds {
                agent: id,
                cell: spec.start,
            });
        }
        Ok(Self {
            id,
            position: spec.start,
            color: spec.color,
            habitat,
            steps: Arc::new(StepCounter::new()),
        })
    }

    /// Index of this agent within its world.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current cell.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Palette.
    pub fn color(&self) -> ColorMode {
        self.color
    }

    /// Steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Shared handle on the step counter, readable while the agent runs on
    /// another thread.
    pub fn step_counter(&self) -> Arc<StepCounter> {
        Arc::clone(&self.steps)
    }

    /// In-bounds king-move neighbours of the current cell, unshuffled.
    pub fn candidates(&self) -> Neighbours {
        self.habitat.map.grid().neighbours(self.position)
    }

    /// Run one full iteration: choose, move, bump, paint.
    ///
    /// Errors are invariant violations; the agent must not keep stepping
    /// after one.
    pub fn step(&mut self) -> Result<StepOutcome, GrowthError> {
        let mut candidates = self.candidates();
        shuffle(&mut candidates, self.habitat.rng.as_ref());
        let cell = self.position;
        let next = select_lowest(&candidates, &self.habitat.map)
            .ok_or(GrowthError::NoCandidates { cell })?;

        let intensity = self.habitat.map.bump(next)?;
        self.position = next;
        let color = self.color.paint(intensity);
        // bump() accepted the cell, so both coordinates are in [0, dim).
        self.habitat
            .canvas
            .set_pixel(next.x as u32, next.y as u32, color);
        self.steps.increment();

        Ok(StepOutcome {
            cell: next,
            intensity,
            color,
        })
    }

    /// Run exactly `n` steps, pausing after each like [`run`](Self::run).
    pub fn run_steps(&mut self, n: u64) -> Result<(), GrowthError> {
        for _ in 0..n {
            self.step()?;
            self.pause();
        }
        Ok(())
    }

    /// The perpetual loop. Steps until `stop` is raised and returns the
    /// number of steps taken in this call.
    ///
    /// On an invariant violation the error is logged and returned; the loop
    /// does not continue.
    pub fn run(&mut self, stop: &StopSignal) -> Result<u64, GrowthError> {
        debug!(
            agent = self.id,
            color = %self.color,
            start = %self.position,
            "agent started"
        );
        let mut taken = 0u64;
        while !stop.is_raised() {
            if let Err(e) = self.step() {
                error!(
                    agent = self.id,
                    position = %self.position,
                    steps = taken,
                    error = %e,
                    "agent stopped on invariant violation"
                );
                return Err(e);
            }
            taken += 1;
            self.pause();
        }
        debug!(agent = self.id, steps = taken, "agent stopped");
        Ok(taken)
    }

    /// Give other agents a chance to run.
    ///
    /// Parks rather than sleeps so that shutdown can wake the thread early
    /// with `unpark`.
    fn pause(&self) {
        let delay = self.habitat.map.config().step_delay;
        if delay == Duration::ZERO {
            thread::yield_now();
        } else {
            thread::park_timeout(delay);
        }
    }
}

/// The first candidate with the lowest intensity, or `None` if there are
/// no candidates.
pub fn select_lowest(candidates: &[Cell], map: &IntensityMap) -> Option<Cell> {
    // min_by_key returns the first of several equal minima.
    candidates.iter().copied().min_by_key(|&c| map.get(c))
}
