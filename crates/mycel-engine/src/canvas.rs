//! Thread-safe paint sinks.
//!
//! - [`RasterCanvas`]: an in-memory framebuffer behind a mutex.
//! - [`ChannelCanvas`]: forwards [`PaintCommand`]s to a single consumer
//!   (typically a render thread) over a crossbeam channel.

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{select, Receiver, Sender, TrySendError};
use mycel_core::{Canvas, PaintCommand, Rgb};

/// A `cols × rows` RGB framebuffer, initially black.
///
/// Writes outside the surface are clipped silently, as a display would.
#[derive(Debug)]
pub struct RasterCanvas {
    cols: u32,
    rows: u32,
    pixels: Mutex<Vec<Rgb>>,
}

impl RasterCanvas {
    /// A black surface of the given size.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            pixels: Mutex::new(vec![Rgb::BLACK; cols as usize * rows as usize]),
        }
    }

    /// Surface width.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Surface height.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let i = self.index(x, y)?;
        Some(self.lock()[i])
    }

    /// Number of pixels that are no longer black.
    pub fn painted_pixels(&self) -> usize {
        self.lock().iter().filter(|&&p| p != Rgb::BLACK).count()
    }

    /// Row-major `[r, g, b, r, g, b, ...]` copy of the surface.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.lock().iter().flat_map(|p| p.to_array()).collect()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.cols && y < self.rows {
            Some(y as usize * self.cols as usize + x as usize)
        } else {
            None
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Rgb>> {
        // A pixel store is a single write; a panicking writer cannot leave
        // the buffer half-updated.
        self.pixels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Canvas for RasterCanvas {
    fn set_pixel(&self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.lock()[i] = color;
        }
    }
}

/// Forwards every pixel write to a channel.
///
/// With a bounded channel, a slow consumer applies back-pressure to the
/// agents: `set_pixel` blocks until there is room. A blocked write gives up
/// and is discarded when the canvas is [closed](Canvas::close), which
/// [`GrowthWorld::shutdown`](crate::GrowthWorld::shutdown) does before
/// joining, so the receiver may be drained after shutdown. A write that finds
/// room is always queued. Once the receiver is dropped, paint is discarded.
#[derive(Clone, Debug)]
pub struct ChannelCanvas {
    tx: Sender<PaintCommand>,
    // Disconnects when the sender below is dropped by `close`.
    closed: Receiver<()>,
    closer: Arc<Mutex<Option<Sender<()>>>>,
}

impl ChannelCanvas {
    /// A canvas feeding a channel of capacity `cap`, and its receiving end.
    pub fn bounded(cap: usize) -> (Self, Receiver<PaintCommand>) {
        let (tx, rx) = crossbeam_channel::bounded(cap);
        (Self::with_sender(tx), rx)
    }

    /// A canvas feeding an unbounded channel, and its receiving end.
    pub fn unbounded() -> (Self, Receiver<PaintCommand>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::with_sender(tx), rx)
    }

    fn with_sender(tx: Sender<PaintCommand>) -> Self {
        let (close_tx, closed) = crossbeam_channel::bounded(0);
        Self {
            tx,
            closed,
            closer: Arc::new(Mutex::new(Some(close_tx))),
        }
    }

    /// Whether [`close`](Canvas::close) has been called on this canvas or
    /// any of its clones.
    pub fn is_closed(&self) -> bool {
        self.closer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Canvas for ChannelCanvas {
    fn set_pixel(&self, x: u32, y: u32, color: Rgb) {
        let cmd = PaintCommand { x, y, color };
        // Best-effort: the consumer may have gone away, or the canvas may
        // be closed while this write waits for room.
        if let Err(TrySendError::Full(cmd)) = self.tx.try_send(cmd) {
            select! {
                send(self.tx, cmd) -> _ => {}
                recv(self.closed) -> _ => {}
            }
        }
    }

    fn close(&self) {
        self.closer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn raster_starts_black() {
        let c = RasterCanvas::new(3, 2);
        assert_eq!((c.cols(), c.rows()), (3, 2));
        assert_eq!(c.pixel(2, 1), Some(Rgb::BLACK));
        assert_eq!(c.painted_pixels(), 0);
        assert_eq!(c.to_rgb_bytes().len(), 3 * 2 * 3);
    }

    #[test]
    fn raster_stores_and_clips() {
        let c = RasterCanvas::new(3, 2);
        c.set_pixel(1, 1, Rgb::new(10, 20, 30));
        c.set_pixel(3, 0, Rgb::new(255, 0, 0));
        c.set_pixel(0, 2, Rgb::new(255, 0, 0));
        assert_eq!(c.pixel(1, 1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(c.pixel(3, 0), None);
        assert_eq!(c.painted_pixels(), 1);
        let bytes = c.to_rgb_bytes();
        assert_eq!(&bytes[12..15], &[10, 20, 30]);
    }

    #[test]
    fn raster_accepts_concurrent_writers() {
        let c = Arc::new(RasterCanvas::new(16, 16));
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let c = Arc::clone(&c);
                thread::spawn(move || {
                    for x in 0..16 {
                        c.set_pixel(x, t, Rgb::new(1, 1, 1));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(c.painted_pixels(), 64);
    }

    #[test]
    fn channel_forwards_in_order() {
        let (canvas, rx) = ChannelCanvas::unbounded();
        canvas.set_pixel(1, 2, Rgb::new(32, 0, 0));
        canvas.set_pixel(3, 4, Rgb::new(48, 0, 0));
        let got: Vec<PaintCommand> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                PaintCommand {
                    x: 1,
                    y: 2,
                    color: Rgb::new(32, 0, 0)
                },
                PaintCommand {
                    x: 3,
                    y: 4,
                    color: Rgb::new(48, 0, 0)
                },
            ]
        );
    }

    #[test]
    fn channel_ignores_dropped_receiver() {
        let (canvas, rx) = ChannelCanvas::bounded(1);
        drop(rx);
        canvas.set_pixel(0, 0, Rgb::BLACK);
    }

    #[test]
    fn close_releases_a_writer_blocked_on_a_full_channel() {
        let (canvas, rx) = ChannelCanvas::bounded(1);
        canvas.set_pixel(0, 0, Rgb::new(32, 0, 0));

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let writer = {
            let canvas = canvas.clone();
            thread::spawn(move || {
                canvas.set_pixel(1, 0, Rgb::new(48, 0, 0));
                let _ = done_tx.send(());
            })
        };
        // Still blocked: nobody is draining.
        assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());

        canvas.close();
        assert!(canvas.is_closed());
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        writer.join().unwrap();

        // Only the write that found room was queued.
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.recv().unwrap().x, 0);
    }

    #[test]
    fn closed_canvas_does_not_block() {
        let (canvas, rx) = ChannelCanvas::bounded(1);
        canvas.close();
        for x in 0..10 {
            canvas.set_pixel(x, 0, Rgb::BLACK);
        }
        // The first write found room; the rest were dropped.
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn raster_close_is_a_no_op() {
        let c = RasterCanvas::new(2, 2);
        c.close();
        c.set_pixel(1, 1, Rgb::new(0, 16, 0));
        assert_eq!(c.pixel(1, 1), Some(Rgb::new(0, 16, 0)));
    }

    #[test]
    fn replayed_commands_fill_a_raster() {
        let (canvas, rx) = ChannelCanvas::unbounded();
        canvas.set_pixel(0, 0, Rgb::new(0, 0, 64));
        drop(canvas);
        let raster = RasterCanvas::new(2, 2);
        for cmd in rx.iter() {
            cmd.apply(&raster);
        }
        assert_eq!(raster.pixel(0, 0), Some(Rgb::new(0, 0, 64)));
    }
}
