//! Per-cell transition rule.
//!
//! Conway's B3/S23 with colors: survivors keep their color, newborns take a
//! color from their neighbors' histogram.

use crate::cell::Cell;

/// Computes the next state of a cell.
///
/// `live` is the number of live neighbors and `counts[i]` the number of
/// neighbors with color `i + 1`.
///
/// Newborn color: scanning colors in order, the first with more than one
/// neighbor wins. Otherwise the last color with no neighbors is used, and if
/// every color has a neighbor the cell stays dead.
pub fn apply_rules(cell: Cell, live: u8, counts: &[u8]) -> Cell {
  if !(2..=3).contains(&live) {
    return Cell::DEAD;
  }

  if cell.is_dead() && live == 3 {
    let mut fallback = Cell::DEAD;
    for (slot, &count) in counts.iter().enumerate() {
      let color = Cell(slot as u8 + 1);
      if count > 1 {
        return color;
      }
      if count == 0 {
        fallback = color;
      }
    }
    return fallback;
  }

  cell
}
