//! The shared growth ledger: one saturating counter per grid cell.
//!
//! Storage is a dense row-major array of `AtomicU8`, one byte per cell.
//! Zero marks an unclaimed cell; a visited cell always holds at least the
//! base intensity, so zero never collides with a real value.
//!
//! [`bump`](IntensityMap::bump) is a compare-and-swap loop, so two agents
//! landing on the same cell at the same time both count. No visit is lost.

use std::sync::atomic::{AtomicU8, Ordering};

use mycel_core::{Cell, ConfigError, Grid, GrowthConfig, GrowthError};

/// Per-cell visit intensity, shared by every agent of a world.
#[derive(Debug)]
pub struct IntensityMap {
    grid: Grid,
    config: GrowthConfig,
    cells: Box<[AtomicU8]>,
}

// Compile-time assertion: IntensityMap must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<IntensityMap>();
};

impl IntensityMap {
    /// An empty map covering the grid described by `config`.
    pub fn new(config: &GrowthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let cells = (0..grid.cell_count()).map(|_| AtomicU8::new(0)).collect();
        Ok(Self {
            grid,
            config: config.clone(),
            cells,
        })
    }

    /// The grid this map covers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The constants this map was built with.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Current intensity of `cell`; 0 if unclaimed or out of bounds.
    pub fn get(&self, cell: Cell) -> u8 {
        match self.grid.index(cell) {
            // Cells are independent counters; no other memory is published
            // through them.
            Some(i) => self.cells[i].load(Ordering::Relaxed),
            None => 0,
        }
    }

    /// Record one visit to `cell` and return its new intensity.
    ///
    /// An unclaimed cell takes the base intensity; a claimed one grows by
    /// the step, clamped to the ceiling.
    pub fn bump(&self, cell: Cell) -> Result<u8, GrowthError> {
        let i = self.grid.index(cell).ok_or(GrowthError::CellOutOfBounds {
            cell,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
        })?;
        let prev = match self.cells[i].fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
            Some(self.config.next_intensity(v))
        }) {
            Ok(v) | Err(v) => v,
        };
        Ok(self.config.next_intensity(prev))
    }

    /// Number of cells visited at least once.
    pub fn claimed_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) != 0)
            .count()
    }

    /// Visited cells and their intensities, in row-major order.
    ///
    /// Not a snapshot: cells bumped during iteration may or may not show
    /// their latest value.
    pub fn iter_claimed(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            let v = c.load(Ordering::Relaxed);
            if v == 0 {
                return None;
            }
            self.grid.cell_at(i).map(|cell| (cell, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn map(cols: u32, rows: u32) -> IntensityMap {
        IntensityMap::new(&GrowthConfig::with_grid(cols, rows)).unwrap()
    }

    #[test]
    fn unclaimed_reads_zero() {
        let m = map(10, 10);
        assert_eq!(m.get(Cell::new(3, 3)), 0);
        assert_eq!(m.claimed_cells(), 0);
        assert_eq!(m.iter_claimed().count(), 0);
    }

    #[test]
    fn first_bump_is_base() {
        let m = map(10, 10);
        assert_eq!(m.bump(Cell::new(3, 4)).unwrap(), 32);
        assert_eq!(m.get(Cell::new(3, 4)), 32);
        assert_eq!(m.claimed_cells(), 1);
        let claimed: Vec<_> = m.iter_claimed().collect();
        assert_eq!(claimed, vec![(Cell::new(3, 4), 32)]);
    }

    #[test]
    fn bumps_step_then_saturate() {
        let m = map(10, 10);
        let c = Cell::new(0, 0);
        let mut expected = 32u32;
        for visit in 1..=20 {
            let v = m.bump(c).unwrap();
            assert_eq!(v as u32, expected.min(255), "visit {visit}");
            expected += 16;
        }
        assert_eq!(m.get(c), 255);
    }

    #[test]
    fn fifteenth_visit_reaches_ceiling() {
        let m = map(10, 10);
        let c = Cell::new(9, 9);
        let last = (0..15).map(|_| m.bump(c).unwrap()).last().unwrap();
        assert_eq!(last, 255);
    }

    #[test]
    fn out_of_bounds_bump_is_an_error() {
        let m = map(10, 10);
        assert_eq!(
            m.bump(Cell::new(10, 0)),
            Err(GrowthError::CellOutOfBounds {
                cell: Cell::new(10, 0),
                cols: 10,
                rows: 10
            })
        );
        assert_eq!(m.get(Cell::new(-1, 0)), 0);
        assert_eq!(m.claimed_cells(), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GrowthConfig {
            intensity_step: 0,
            ..GrowthConfig::with_grid(4, 4)
        };
        assert!(IntensityMap::new(&config).is_err());
    }

    #[test]
    fn concurrent_bumps_on_one_cell_are_not_lost() {
        let config = GrowthConfig {
            base_intensity: 1,
            intensity_step: 1,
            ..GrowthConfig::with_grid(4, 4)
        };
        let m = Arc::new(IntensityMap::new(&config).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&m);
                thread::spawn(move || {
                    for _ in 0..50 {
                        m.bump(Cell::new(1, 1)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 200 visits of +1 from a base of 1, clamped at 255.
        assert_eq!(m.get(Cell::new(1, 1)), 200);
    }

    proptest! {
        #[test]
        fn intensity_always_within_bounds(
            visits in proptest::collection::vec((0i32..6, 0i32..6), 0..300),
        ) {
            let m = map(6, 6);
            for (x, y) in visits {
                let v = m.bump(Cell::new(x, y)).unwrap();
                prop_assert!(v >= 32);
            }
            for (_, v) in m.iter_claimed() {
                prop_assert!((32..=255).contains(&v));
            }
        }

        #[test]
        fn bump_never_decreases(n in 1usize..40) {
            let m = map(3, 3);
            let mut prev = 0u8;
            for _ in 0..n {
                let v = m.bump(Cell::new(1, 1)).unwrap();
                prop_assert!(v >= prev);
                prev = v;
            }
        }
    }
}
