//! The random-draw seam shared by every agent of a world.

/// A source of uniformly distributed integers, shared across threads.
///
/// Implementations must make each draw atomic with respect to every other
/// draw: two agents drawing at the same time must never corrupt the
/// generator state or observe the same draw. They need not serialize
/// anything beyond the draw itself.
pub trait RandomSource: Send + Sync {
    /// A value in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// May panic if `bound == 0`.
    fn next(&self, bound: usize) -> usize;
}
