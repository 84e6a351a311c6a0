//! Four colonies, one per corner of a 1000x1000 grid, competing for space.
//!
//! Demonstrates:
//!   1. Building the default configuration and the four-corner layout
//!   2. Feeding paint through a ChannelCanvas into a render thread
//!   3. Letting the colonies grow, then shutting them down cleanly
//!   4. Writing the rendered surface to `four_corners.png`
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example four_corners -- 10
//!
//! The optional argument is the run time in seconds (default 5).

use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use image::RgbImage;
use mycel_core::{ColonySpec, GrowthConfig};
use mycel_engine::{ChannelCanvas, GrowthWorld, SharedRandom};
use tracing::info;

const OUTPUT: &str = "four_corners.png";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let config = GrowthConfig::default();
    let specs = ColonySpec::four_corners(&config);

    // ─── Render thread: the only writer to the image ────────────
    let (canvas, paint_rx) = ChannelCanvas::bounded(4096);
    let (cols, rows) = (config.cols, config.rows);
    let render = thread::Builder::new()
        .name("mycel-render".into())
        .spawn(move || {
            let mut img = RgbImage::new(cols, rows);
            for cmd in paint_rx.iter() {
                img.put_pixel(cmd.x, cmd.y, image::Rgb(cmd.color.to_array()));
            }
            img
        })?;

    // ─── Grow ───────────────────────────────────────────────────
    let mut world = GrowthWorld::spawn(
        config,
        &specs,
        Arc::new(canvas),
        Arc::new(SharedRandom::from_entropy()),
    )?;
    info!(seconds, "colonies growing");
    thread::sleep(Duration::from_secs(seconds));

    let report = world.shutdown();
    for (spec, steps) in specs.iter().zip(&report.steps) {
        info!(color = %spec.color, steps, "colony finished");
    }
    for failure in &report.failures {
        info!(agent = failure.agent, error = %failure.error, "colony failed");
    }
    info!(
        claimed = world.intensity_map().claimed_cells(),
        total_steps = report.total_steps(),
        "growth complete"
    );

    // Shutdown released every sender; the render thread drains and exits.
    let img = render.join().map_err(|_| "render thread panicked")?;
    img.save(OUTPUT)?;
    info!(path = OUTPUT, "image written");
    Ok(())
}
