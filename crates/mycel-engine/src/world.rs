//! Spawning colonies and the world handle.
//!
//! ```text
//! GrowthWorld::spawn                         mycel-agent-{i} (one per spec)
//!     | validate config                          |
//!     | build IntensityMap                       | loop until StopSignal:
//!     | build every Agent (reject bad starts)    |   neighbours → shuffle
//!     | spawn threads ------------------------>  |   select_lowest → bump
//!     |                                          |   set_pixel → park(delay)
//!     | shutdown(): raise + unpark ------------> |
//!     | join, collect steps/failures <---------- | Ok(steps) | Err(GrowthError)
//! ```
//!
//! Dropping the handle does not stop anything: the threads are detached and
//! keep growing until the process exits.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use mycel_core::{
    Canvas, ColonySpec, ColorMode, ConfigError, GrowthConfig, GrowthError, RandomSource,
};
use tracing::{info, warn};

use crate::agent::{Agent, Habitat};
use crate::intensity::IntensityMap;
use crate::metrics::{StepCounter, StopSignal};

// ── ShutdownReport ───────────────────────────────────────────────

/// An agent that ended on an invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentFailure {
    /// Index of the agent.
    pub agent: usize,
    /// What went wrong.
    pub error: GrowthError,
}

/// Report from [`GrowthWorld::shutdown`].
#[derive(Debug)]
pub struct ShutdownReport {
    /// Time spent stopping and joining, in milliseconds.
    pub total_ms: u64,
    /// Number of agent threads joined without panicking.
    pub agents_joined: usize,
    /// Completed steps per agent, indexed like the colony specs.
    pub steps: Vec<u64>,
    /// Agents that stopped on an invariant violation.
    pub failures: Vec<AgentFailure>,
    /// Agents whose thread panicked.
    pub panicked: Vec<usize>,
}

impl ShutdownReport {
    /// Sum of all agents' steps.
    pub fn total_steps(&self) -> u64 {
        self.steps.iter().sum()
    }

    /// Whether every agent stopped because it was asked to.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.panicked.is_empty()
    }
}

// ── GrowthWorld ──────────────────────────────────────────────────

struct AgentThread {
    color: ColorMode,
    steps: Arc<StepCounter>,
    handle: Option<JoinHandle<Result<u64, GrowthError>>>,
}

/// Handle on a set of running colonies sharing one intensity map.
pub struct GrowthWorld {
    map: Arc<IntensityMap>,
    // Released by `shutdown` so paint receivers see the channel end.
    canvas: Option<Arc<dyn Canvas>>,
    stop: StopSignal,
    agents: Vec<AgentThread>,
}

impl GrowthWorld {
    /// Validate `config` and `specs`, then start one thread per spec.
    ///
    /// Every agent is constructed before any thread starts, so a bad spec
    /// leaves nothing running. If a thread cannot be spawned, the ones
    /// already started are stopped and joined before the error is returned.
    pub fn spawn(
        config: GrowthConfig,
        specs: &[ColonySpec],
        canvas: Arc<dyn Canvas>,
        rng: Arc<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::NoColonies);
        }
        let map = Arc::new(IntensityMap::new(&config)?);
        let habitat = Habitat::new(Arc::clone(&map), rng, Arc::clone(&canvas));

        let agents = specs
            .iter()
            .enumerate()
            .map(|(id, &spec)| Agent::new(id, spec, habitat.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut world = Self {
            map,
            canvas: Some(canvas),
            stop: StopSignal::new(),
            agents: Vec::with_capacity(agents.len()),
        };

        for mut agent in agents {
            let id = agent.id();
            let color = agent.color();
            let steps = agent.step_counter();
            let stop = world.stop.clone();
            let spawned = thread::Builder::new()
                .name(format!("mycel-agent-{id}"))
                .spawn(move || agent.run(&stop));
            match spawned {
                Ok(handle) => world.agents.push(AgentThread {
                    color,
                    steps,
                    handle: Some(handle),
                }),
                Err(e) => {
                    world.shutdown();
                    return Err(ConfigError::ThreadSpawnFailed {
                        reason: format!("mycel-agent-{id}: {e}"),
                    });
                }
            }
        }

        info!(
            agents = world.agents.len(),
            cols = config.cols,
            rows = config.rows,
            "growth world spawned"
        );
        Ok(world)
    }

    /// Start the colonies and let them run until the process exits.
    pub fn launch(
        config: GrowthConfig,
        specs: &[ColonySpec],
        canvas: Arc<dyn Canvas>,
        rng: Arc<dyn RandomSource>,
    ) -> Result<(), ConfigError> {
        Self::spawn(config, specs, canvas, rng).map(drop)
    }

    /// The shared intensity map.
    pub fn intensity_map(&self) -> &Arc<IntensityMap> {
        &self.map
    }

    /// Number of agents in this world.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Palette of each agent, indexed like the colony specs.
    pub fn colors(&self) -> Vec<ColorMode> {
        self.agents.iter().map(|a| a.color).collect()
    }

    /// Steps completed so far by each agent.
    pub fn steps(&self) -> Vec<u64> {
        self.agents.iter().map(|a| a.steps.get()).collect()
    }

    /// Steps completed so far by all agents together.
    pub fn total_steps(&self) -> u64 {
        self.agents.iter().map(|a| a.steps.get()).sum()
    }

    /// Whether any agent thread is still running.
    pub fn is_running(&self) -> bool {
        self.agents
            .iter()
            .any(|a| a.handle.as_ref().is_some_and(|h| !h.is_finished()))
    }

    /// Stop every agent and join its thread.
    ///
    /// Each agent finishes the step it is in, then exits. Parked agents are
    /// woken immediately, and the canvas is [closed](Canvas::close) so an
    /// agent blocked on a full paint channel gives up its write. The world
    /// drops its own handle on the canvas. Calling this twice returns an
    /// empty report the second time.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let start = Instant::now();
        self.stop.raise();
        if let Some(canvas) = self.canvas.take() {
            canvas.close();
        }
        for agent in &self.agents {
            if let Some(h) = &agent.handle {
                h.thread().unpark();
            }
        }

        let mut agents_joined = 0;
        let mut failures = Vec::new();
        let mut panicked = Vec::new();
        for (id, agent) in self.agents.iter_mut().enumerate() {
            let Some(handle) = agent.handle.take() else {
                continue;
            };
            match handle.join() {
                Ok(Ok(_)) => agents_joined += 1,
                Ok(Err(error)) => {
                    agents_joined += 1;
                    failures.push(AgentFailure { agent: id, error });
                }
                Err(_) => {
                    warn!(agent = id, "agent thread panicked");
                    panicked.push(id);
                }
            }
        }

        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            agents_joined,
            steps: self.steps(),
            failures,
            panicked,
        };
        info!(
            agents = report.agents_joined,
            total_steps = report.total_steps(),
            claimed = self.map.claimed_cells(),
            elapsed_ms = report.total_ms,
            "growth world shut down"
        );
        report
    }
}
