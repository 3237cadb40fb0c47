//! Cellular automaton step.
//!
//! Every cell's next state is computed from the pre-tick grid only, so the
//! step can run in parallel over the write buffer.

pub mod rules;

use rayon::prelude::*;

pub use rules::apply_rules;

use crate::cell::{Cell, MAX_LIVE_COLORS};
use crate::coords::{GridSize, Neighbors};

/// Live-neighbor histogram of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
  /// Number of live neighbors (0..=8).
  pub live: u8,
  /// `counts[i]` is the number of neighbors with color `i + 1`.
  pub counts: [u8; MAX_LIVE_COLORS],
}

impl Neighborhood {
  /// Histogram restricted to the first `live_colors` colors.
  #[inline]
  pub fn color_counts(&self, live_colors: u8) -> &[u8] {
    &self.counts[..live_colors as usize]
  }
}

/// Builds the histogram of `neighbors` on `cells`.
pub fn neighborhood(cells: &[Cell], neighbors: &Neighbors) -> Neighborhood {
  let mut hood = Neighborhood::default();
  for &i in neighbors {
    let c = cells[i];
    if c.is_alive() {
      hood.live += 1;
      hood.counts[c.color_slot()] += 1;
    }
  }
  hood
}

/// Returns true if no neighbor of `idx` is alive.
#[inline]
pub(crate) fn neighbors_all_dead(cells: &[Cell], size: GridSize, idx: usize) -> bool {
  size.neighbors(idx).iter().all(|&n| cells[n].is_dead())
}

/// Writes the next generation of `current` into `next`.
///
/// Both slices must have `size.len()` cells.
pub fn step(current: &[Cell], next: &mut [Cell], size: GridSize, live_colors: u8) {
  debug_assert_eq!(current.len(), size.len());
  debug_assert_eq!(next.len(), size.len());

  next.par_iter_mut().enumerate().for_each(|(idx, out)| {
    let hood = neighborhood(current, &size.neighbors(idx));
    *out = apply_rules(current[idx], hood.live, hood.color_counts(live_colors));
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cells(values: &[u8]) -> Vec<Cell> {
    values.iter().copied().map(Cell).collect()
  }

  #[rustfmt::skip]
  const GLIDER: [u8; 25] = [
    0, 0, 0, 0, 0,
    0, 0, 1, 0, 0,
    0, 0, 0, 2, 0,
    0, 1, 3, 3, 0,
    0, 0, 0, 0, 0,
  ];

  #[test]
  fn histogram_of_glider_center() {
    let grid = cells(&GLIDER);
    let size = GridSize::new(5, 5).unwrap();
    let hood = neighborhood(&grid, &size.neighbors(size.index(2, 2)));

    assert_eq!(hood.live, 5);
    assert_eq!(hood.color_counts(4), &[2, 1, 2, 0]);
  }

  #[test]
  fn histogram_of_empty_neighborhood() {
    let grid = cells(&GLIDER);
    let size = GridSize::new(5, 5).unwrap();
    assert_eq!(neighborhood(&grid, &size.neighbors(0)).live, 0);
    assert!(neighbors_all_dead(&grid, size, 0));
    assert!(!neighbors_all_dead(&grid, size, size.index(2, 2)));
  }

  #[test]
  fn blinker_oscillates_keeping_colors() {
    let size = GridSize::new(5, 5).unwrap();
    let mut grid = vec![Cell::DEAD; 25];
    grid[size.index(1, 2)] = Cell(2);
    grid[size.index(2, 2)] = Cell(2);
    grid[size.index(3, 2)] = Cell(2);

    let mut next = vec![Cell::DEAD; 25];
    step(&grid, &mut next, size, 4);

    let live: Vec<_> = (0..25).filter(|&i| next[i].is_alive()).collect();
    assert_eq!(
      live,
      vec![size.index(2, 1), size.index(2, 2), size.index(2, 3)]
    );
    assert!(live.iter().all(|&i| next[i] == Cell(2)));
  }
}
