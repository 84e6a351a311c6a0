//! Mutex-guarded shared generator and the Fisher–Yates shuffle.
//!
//! Every agent of a world draws from one [`SharedRandom`]. The lock covers
//! exactly one draw; the shuffle loop around it runs unlocked, so draws
//! from different agents interleave freely.

use std::sync::{Mutex, PoisonError};

use mycel_core::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A ChaCha8 generator behind a mutex.
#[derive(Debug)]
pub struct SharedRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SharedRandom {
    /// A generator with a fixed seed. Single-agent runs are reproducible;
    /// multi-agent runs also depend on thread interleaving.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// A generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }
}

impl Default for SharedRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SharedRandom {
    fn next(&self, bound: usize) -> usize {
        assert!(bound > 0, "random bound must be positive");
        // A panic cannot happen between reading and advancing the stream,
        // so a poisoned generator is still consistent.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..bound)
    }
}

/// Uniformly permute `items` in place (Fisher–Yates).
///
/// Issues `len - 1` draws, each through `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycel_test_utils::{MaxRandom, ScriptedRandom, ZeroRandom};
    use proptest::prelude::*;

    #[test]
    fn draws_stay_in_range() {
        let rng = SharedRandom::seeded(7);
        for bound in 1..50 {
            for _ in 0..100 {
                assert!(rng.next(bound) < bound);
            }
        }
    }

    #[test]
    fn bound_one_is_always_zero() {
        let rng = SharedRandom::from_entropy();
        assert!((0..100).all(|_| rng.next(1) == 0));
    }

    #[test]
    #[should_panic(expected = "random bound must be positive")]
    fn bound_zero_panics() {
        SharedRandom::seeded(0).next(0);
    }

    #[test]
    fn same_seed_same_stream() {
        let a = SharedRandom::seeded(42);
        let b = SharedRandom::seeded(42);
        let sa: Vec<usize> = (0..64).map(|_| a.next(1000)).collect();
        let sb: Vec<usize> = (0..64).map(|_| b.next(1000)).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn poisoned_lock_still_draws() {
        let rng = std::sync::Arc::new(SharedRandom::seeded(3));
        let r = std::sync::Arc::clone(&rng);
        let _ = std::thread::spawn(move || {
            let _guard = r.rng.lock().unwrap();
            panic!("poison the generator lock");
        })
        .join();
        assert!(rng.rng.is_poisoned());
        assert!(rng.next(8) < 8);
    }

    // ── Shuffle ─────────────────────────────────────────────────

    #[test]
    fn shuffle_with_max_draws_is_identity() {
        let mut v = [1, 2, 3, 4, 5];
        shuffle(&mut v, &MaxRandom);
        assert_eq!(v, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn shuffle_with_zero_draws_rotates() {
        // [1,2,3,4,5] -> swap(4,0) [5,2,3,4,1] -> swap(3,0) [4,2,3,5,1]
        // -> swap(2,0) [3,2,4,5,1] -> swap(1,0) [2,3,4,5,1]
        let mut v = [1, 2, 3, 4, 5];
        shuffle(&mut v, &ZeroRandom);
        assert_eq!(v, [2, 3, 4, 5, 1]);
    }

    #[test]
    fn shuffle_draw_count() {
        let rng = ScriptedRandom::new(vec![0]);
        let mut v = [0u8; 8];
        shuffle(&mut v, &rng);
        assert_eq!(rng.draws(), 7);

        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &rng);
        let mut one = [9u8];
        shuffle(&mut one, &rng);
        assert_eq!(rng.draws(), 7);
    }

    #[test]
    fn shuffle_reaches_every_position() {
        let rng = SharedRandom::seeded(11);
        let mut seen = [[false; 4]; 4];
        for _ in 0..500 {
            let mut v = [0usize, 1, 2, 3];
            shuffle(&mut v, &rng);
            for (pos, &item) in v.iter().enumerate() {
                seen[item][pos] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    proptest! {
        #[test]
        fn shuffle_is_permutation(
            items in proptest::collection::vec(any::<i32>(), 0..32),
            script in proptest::collection::vec(any::<usize>(), 1..64),
        ) {
            let rng = ScriptedRandom::new(script);
            let mut shuffled = items.clone();
            shuffle(&mut shuffled, &rng);
            let mut a = items;
            let mut b = shuffled;
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }
    }
}
