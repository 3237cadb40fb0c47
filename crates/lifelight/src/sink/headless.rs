use std::convert::Infallible;

use lifelight_automaton::{PixelSink, Rgba, RgbaSurface};

/// Keeps the last frame in memory. Used when no display is attached.
pub struct HeadlessSink {
  frame: RgbaSurface,
  renders: u64,
  clears: u64,
}

impl HeadlessSink {
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      frame: RgbaSurface::new(width, height),
      renders: 0,
      clears: 0,
    }
  }

  pub fn frame(&self) -> &RgbaSurface {
    &self.frame
  }

  /// Frames presented with `render`.
  pub fn renders(&self) -> u64 {
    self.renders
  }

  pub fn clears(&self) -> u64 {
    self.clears
  }
}

impl PixelSink for HeadlessSink {
  type Error = Infallible;

  fn set(&mut self, x: usize, y: usize, color: Rgba) {
    self.frame.set(x, y, color);
  }

  fn render(&mut self) -> Result<(), Infallible> {
    self.renders += 1;
    Ok(())
  }

  /// Blanks the frame and presents it, so a clear also counts as a render.
  fn clear(&mut self, _width: usize, _height: usize) -> Result<(), Infallible> {
    self.frame.fill(Rgba::BLACK);
    self.clears += 1;
    self.render()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clear_presents_a_black_frame() {
    let mut sink = HeadlessSink::new(4, 2);
    sink.set(1, 1, Rgba::WHITE);
    sink.render().unwrap();
    assert_eq!(sink.frame()[(1, 1)], Rgba::WHITE);
    assert_eq!(sink.renders(), 1);

    sink.clear(4, 2).unwrap();
    assert_eq!(sink.clears(), 1);
    assert_eq!(sink.renders(), 2);
    assert!(sink.frame().as_slice().iter().all(|&c| c == Rgba::BLACK));
  }
}
