//! Colors and the pixel sink interface.
//!
//! The automaton never draws anything itself. It maps cells to colors via a
//! [`ColorScheme`] and hands them to a [`PixelSink`].

use crate::cell::Cell;

/// RGBA pixel with 8 bits per channel.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba {
  /// Creates a new RGBA pixel.
  #[inline]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB pixel (alpha = 255).
  #[inline]
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Opaque black.
  pub const BLACK: Self = Self::rgb(0, 0, 0);

  /// Opaque white.
  pub const WHITE: Self = Self::rgb(255, 255, 255);
}

/// Cell-state to color mapping. Index 0 (dead) is always black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScheme {
  colors: Vec<Rgba>,
}

impl ColorScheme {
  /// Builds a scheme from the live colors, in cell order `1..=K`.
  pub fn from_live(live: &[Rgba]) -> Self {
    let mut colors = Vec::with_capacity(live.len() + 1);
    colors.push(Rgba::BLACK);
    colors.extend_from_slice(live);
    Self { colors }
  }

  /// Color of a cell state. States beyond the scheme render as black.
  #[inline]
  pub fn color(&self, cell: Cell) -> Rgba {
    self
      .colors
      .get(cell.0 as usize)
      .copied()
      .unwrap_or(Rgba::BLACK)
  }

  /// Number of live colors in the scheme.
  pub fn live_count(&self) -> usize {
    self.colors.len() - 1
  }

  pub fn live_colors(&self) -> &[Rgba] {
    &self.colors[1..]
  }
}

impl Default for ColorScheme {
  fn default() -> Self {
    Self::from_live(&[
      Rgba::rgb(255, 0, 0),
      Rgba::rgb(0, 255, 0),
      Rgba::rgb(0, 0, 255),
      Rgba::WHITE,
    ])
  }
}

/// Destination for rendered frames: an LED matrix, a terminal, a test buffer.
///
/// `set` stages one pixel; `render` presents the staged frame.
pub trait PixelSink {
  type Error: std::error::Error;

  /// Stages the color of pixel (x, y).
  fn set(&mut self, x: usize, y: usize, color: Rgba);

  /// Presents all staged pixels.
  fn render(&mut self) -> Result<(), Self::Error>;

  /// Blanks a `width` x `height` area and presents it.
  fn clear(&mut self, width: usize, height: usize) -> Result<(), Self::Error> {
    for y in 0..height {
      for x in 0..width {
        self.set(x, y, Rgba::BLACK);
      }
    }
    self.render()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_scheme_matches_reference_colors() {
    let scheme = ColorScheme::default();
    assert_eq!(scheme.live_count(), 4);
    assert_eq!(scheme.color(Cell::DEAD), Rgba::BLACK);
    assert_eq!(scheme.color(Cell(1)), Rgba::rgb(255, 0, 0));
    assert_eq!(scheme.color(Cell(4)), Rgba::WHITE);
  }

  #[test]
  fn unknown_state_renders_black() {
    let scheme = ColorScheme::from_live(&[Rgba::WHITE]);
    assert_eq!(scheme.color(Cell(1)), Rgba::WHITE);
    assert_eq!(scheme.color(Cell(2)), Rgba::BLACK);
  }

  #[test]
  fn rgba_size() {
    assert_eq!(std::mem::size_of::<Rgba>(), 4);
  }
}
