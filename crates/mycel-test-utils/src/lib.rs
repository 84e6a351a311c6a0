//! Test doubles for Mycel development.
//!
//! Provides a recording [`Canvas`] and deterministic [`RandomSource`]
//! implementations so agent behavior can be asserted exactly.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use mycel_core::{Canvas, Cell, PaintCommand, RandomSource, Rgb};

/// Canvas that records every paint command in arrival order.
///
/// Thread-safe, so it can stand in for the real sink behind a running
/// world.
#[derive(Default)]
pub struct RecordingCanvas {
    commands: Mutex<Vec<PaintCommand>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything painted so far.
    pub fn commands(&self) -> Vec<PaintCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Number of paint commands received.
    pub fn len(&self) -> usize {
        self.commands.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent paint command, if any.
    pub fn last(&self) -> Option<PaintCommand> {
        self.commands.lock().unwrap().last().copied()
    }

    /// How many times each cell was painted.
    pub fn visits(&self) -> HashMap<Cell, usize> {
        let mut visits = HashMap::new();
        for cmd in self.commands.lock().unwrap().iter() {
            *visits
                .entry(Cell::new(cmd.x as i32, cmd.y as i32))
                .or_insert(0) += 1;
        }
        visits
    }

    /// The last color painted on each cell.
    pub fn final_colors(&self) -> HashMap<Cell, Rgb> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|cmd| (Cell::new(cmd.x as i32, cmd.y as i32), cmd.color))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_pixel(&self, x: u32, y: u32, color: Rgb) {
        self.commands
            .lock()
            .unwrap()
            .push(PaintCommand { x, y, color });
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound, so any
/// sequence is a valid script.
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "script must contain at least one value");
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl RandomSource for ScriptedRandom {
    fn next(&self, bound: usize) -> usize {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()] % bound
    }
}

/// Always draws the largest allowed value, which makes Fisher–Yates an
/// identity permutation.
pub struct MaxRandom;

impl RandomSource for MaxRandom {
    fn next(&self, bound: usize) -> usize {
        bound - 1
    }
}

/// Always draws zero.
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn next(&self, _bound: usize) -> usize {
        0
    }
}
