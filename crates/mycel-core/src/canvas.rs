//! The paint sink growth agents write to.

use crate::cell::Rgb;

/// A raster surface that accepts single-pixel writes.
///
/// Agents on different threads call `set_pixel` concurrently, so
/// implementations must be `Send + Sync` and serialize internally.
pub trait Canvas: Send + Sync {
    /// Set the pixel at column `x`, row `y` to `color`.
    fn set_pixel(&self, x: u32, y: u32, color: Rgb);

    /// Called once the agents painting here have been told to stop.
    ///
    /// A sink whose `set_pixel` can block must release any blocked writer
    /// and may discard later writes. The default does nothing.
    fn close(&self) {}
}

/// One pixel write, as a value.
///
/// Used by sinks that forward paint to another thread and by test doubles
/// that record what was painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintCommand {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Color to paint.
    pub color: Rgb,
}

impl PaintCommand {
    /// Replay this command onto `canvas`.
    pub fn apply(&self, canvas: &dyn Canvas) {
        canvas.set_pixel(self.x, self.y, self.color);
    }
}
