//! Toroidal grid geometry.
//!
//! Cells are stored row-major in a flat buffer (`y * width + x`). Both axes
//! wrap, so every cell has exactly eight neighbor slots.

/// Number of cells in a Moore neighborhood.
pub const NEIGHBOR_COUNT: usize = 8;

/// Linear indices of the eight wraparound neighbors of a cell.
pub type Neighbors = [usize; NEIGHBOR_COUNT];

/// Converts (x, y) to a linear index.
#[inline]
pub const fn index(x: usize, y: usize, width: usize) -> usize {
  y * width + x
}

/// Converts a linear index back to (x, y).
#[inline]
pub const fn coords(idx: usize, width: usize) -> (usize, usize) {
  (idx % width, idx / width)
}

/// Returns the eight wraparound neighbors of `idx`.
///
/// Order is fixed: x offsets {-1, 0, +1} outer, y offsets {-1, 0, +1} inner,
/// skipping the cell itself. Negative offsets are taken as `width - 1` and
/// `height - 1` so the arithmetic stays unsigned.
pub fn neighbors(idx: usize, width: usize, height: usize) -> Neighbors {
  let (x, y) = coords(idx, width);
  let mut out = [0; NEIGHBOR_COUNT];
  let mut i = 0;

  for dx in [width - 1, 0, 1] {
    for dy in [height - 1, 0, 1] {
      if dx == 0 && dy == 0 {
        continue;
      }
      out[i] = index((x + dx) % width, (y + dy) % height, width);
      i += 1;
    }
  }

  out
}

/// Validated grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
  width: usize,
  height: usize,
  len: usize,
}

impl GridSize {
  /// Creates grid dimensions, or `None` if either axis is zero or the cell
  /// count does not fit in one allocation.
  pub const fn new(width: usize, height: usize) -> Option<Self> {
    if width == 0 || height == 0 {
      return None;
    }
    match width.checked_mul(height) {
      Some(len) if len <= isize::MAX as usize => Some(Self { width, height, len }),
      _ => None,
    }
  }

  #[inline]
  pub const fn width(self) -> usize {
    self.width
  }

  #[inline]
  pub const fn height(self) -> usize {
    self.height
  }

  /// Total number of cells.
  #[inline]
  pub const fn len(self) -> usize {
    self.len
  }

  #[inline]
  pub const fn is_empty(self) -> bool {
    self.len == 0
  }

  #[inline]
  pub const fn index(self, x: usize, y: usize) -> usize {
    index(x, y, self.width)
  }

  #[inline]
  pub const fn coords(self, idx: usize) -> (usize, usize) {
    coords(idx, self.width)
  }

  #[inline]
  pub fn neighbors(self, idx: usize) -> Neighbors {
    neighbors(idx, self.width, self.height)
  }
}
