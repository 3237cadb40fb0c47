//! Cell states.

use rand::Rng;

/// Largest supported number of live colors.
pub const MAX_LIVE_COLORS: usize = 15;

/// Number of live colors in the reference display.
pub const DEFAULT_LIVE_COLORS: u8 = 4;

/// State of one grid cell: 0 is dead, `1..=K` are live colors.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(pub u8);

impl Cell {
  pub const DEAD: Cell = Cell(0);

  #[inline]
  pub const fn is_dead(self) -> bool {
    self.0 == 0
  }

  #[inline]
  pub const fn is_alive(self) -> bool {
    self.0 != 0
  }

  /// Zero-based slot of this color in a neighborhood histogram.
  ///
  /// Only meaningful for live cells.
  #[inline]
  pub(crate) const fn color_slot(self) -> usize {
    self.0 as usize - 1
  }
}

impl From<u8> for Cell {
  fn from(value: u8) -> Self {
    Cell(value)
  }
}

/// Picks a random cell state: dead half the time, otherwise a uniformly
/// chosen live color in `1..=live_colors`.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, live_colors: u8) -> Cell {
  if rng.random_bool(0.5) {
    Cell(rng.random_range(1..=live_colors))
  } else {
    Cell::DEAD
  }
}
