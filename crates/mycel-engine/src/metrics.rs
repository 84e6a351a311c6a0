//! Lock-free per-agent progress counters.
//!
//! [`StepCounter`] is written by exactly one agent thread and read by the
//! world handle. [`StopSignal`] is written by the world handle and read by
//! every agent.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Number of completed steps of one agent, padded to avoid false sharing.
///
/// Agents on neighbouring cores bump their counters every step; without
/// padding, adjacent counters would share a cache line. 128-byte alignment
/// covers both 64-byte (x86) and 128-byte (Apple M-series) lines.
#[repr(align(128))]
#[derive(Debug, Default)]
pub struct StepCounter {
    steps: AtomicU64,
}

impl StepCounter {
    /// A counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed step.
    pub fn increment(&self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    /// Steps completed so far.
    pub fn get(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }
}

/// Cooperative stop flag shared by every agent of a world.
///
/// Agents check it at the top of each iteration. Nothing raises it unless
/// asked to, so by default agents run until the process exits.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    raised: Arc<AtomicBool>,
}

impl StopSignal {
    /// A lowered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every agent watching this signal to stop after its current step.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Whether [`raise`](Self::raise) has been called.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
