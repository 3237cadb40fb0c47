//! Generic 2D frame buffer.
//!
//! A [`Surface`] holds one element per pixel in row-major order
//! (`y * width + x`). Sinks use [`RgbaSurface`] to stage a frame.

use std::ops::{Index, IndexMut};

use crate::render::Rgba;

/// Row-major 2D buffer, one element per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface<T> {
  data: Box<[T]>,
  width: usize,
  height: usize,
}

impl<T: Clone + Default> Surface<T> {
  pub fn new(width: usize, height: usize) -> Self {
    Self::filled(width, height, T::default())
  }
}

impl<T: Clone> Surface<T> {
  /// A `width` x `height` surface with every element set to `value`.
  pub fn filled(width: usize, height: usize, value: T) -> Self {
    Self {
      data: vec![value; width * height].into_boxed_slice(),
      width,
      height,
    }
  }

  /// Overwrites every element.
  pub fn fill(&mut self, value: T) {
    self.data.fill(value);
  }
}

impl<T> Surface<T> {
  #[inline]
  pub fn width(&self) -> usize {
    self.width
  }

  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  #[inline]
  fn index_of(&self, x: usize, y: usize) -> Option<usize> {
    if x < self.width && y < self.height {
      Some(y * self.width + x)
    } else {
      None
    }
  }

  /// Element at (x, y), if inside the surface.
  #[inline]
  pub fn get(&self, x: usize, y: usize) -> Option<&T> {
    self.index_of(x, y).map(|i| &self.data[i])
  }

  /// Sets the element at (x, y). Returns `false` if out of bounds.
  #[inline]
  pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
    if let Some(i) = self.index_of(x, y) {
      self.data[i] = value;
      true
    } else {
      false
    }
  }

  /// Row `y` as a slice.
  pub fn row(&self, y: usize) -> &[T] {
    &self.data[y * self.width..(y + 1) * self.width]
  }

  pub fn as_slice(&self) -> &[T] {
    &self.data
  }
}

impl<T> Index<(usize, usize)> for Surface<T> {
  type Output = T;

  #[inline]
  fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
    &self.data[y * self.width + x]
  }
}

impl<T> IndexMut<(usize, usize)> for Surface<T> {
  #[inline]
  fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
    &mut self.data[y * self.width + x]
  }
}

/// A surface of RGBA pixels.
pub type RgbaSurface = Surface<Rgba>;
