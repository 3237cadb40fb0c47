//! The automaton: current grid, write buffer and reseed state.

use rand::rngs::StdRng;

use crate::cell::{Cell, DEFAULT_LIVE_COLORS, MAX_LIVE_COLORS, random_cell};
use crate::coords::GridSize;
use crate::error::AutomatonError;
use crate::render::{ColorScheme, PixelSink};
use crate::seeding::{Reseeder, SeedConfig, SeedOutcome};
use crate::simulation;

/// Parameters fixed for the automaton's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutomatonConfig {
  pub width: usize,
  pub height: usize,
  /// Number of live colors (K).
  pub live_colors: u8,
  pub seed: SeedConfig,
}

impl Default for AutomatonConfig {
  fn default() -> Self {
    Self {
      width: 32,
      height: 32,
      live_colors: DEFAULT_LIVE_COLORS,
      seed: SeedConfig::default(),
    }
  }
}

impl AutomatonConfig {
  /// Checks every parameter, returning the validated grid size.
  pub fn validate(&self) -> Result<GridSize, AutomatonError> {
    let size = GridSize::new(self.width, self.height).ok_or(AutomatonError::InvalidDimensions {
      width: self.width,
      height: self.height,
    })?;

    if self.live_colors == 0 || self.live_colors as usize > MAX_LIVE_COLORS {
      return Err(AutomatonError::InvalidColorCount(self.live_colors));
    }

    let threshold = self.seed.threshold;
    if !(0.0..=1.0).contains(&threshold) {
      return Err(AutomatonError::InvalidThreshold(threshold));
    }

    let decay = self.seed.threshold_decay;
    if !decay.is_finite() || decay < 0.0 {
      return Err(AutomatonError::InvalidDecay(decay));
    }

    Ok(size)
  }
}

/// Double-buffered colored Game of Life on a torus.
pub struct Automaton {
  size: GridSize,
  live_colors: u8,
  cells: Vec<Cell>,
  buffer: Vec<Cell>,
  reseeder: Reseeder,
  last_outcome: Option<SeedOutcome>,
  generation: u64,
  rng: StdRng,
}

impl Automaton {
  /// Creates an all-dead automaton.
  pub fn new(config: AutomatonConfig, rng: StdRng) -> Result<Self, AutomatonError> {
    let size = config.validate()?;
    Ok(Self {
      size,
      live_colors: config.live_colors,
      cells: vec![Cell::DEAD; size.len()],
      buffer: vec![Cell::DEAD; size.len()],
      reseeder: Reseeder::new(config.seed),
      last_outcome: None,
      generation: 0,
      rng,
    })
  }

  pub fn size(&self) -> GridSize {
    self.size
  }

  pub fn live_colors(&self) -> u8 {
    self.live_colors
  }

  /// The current grid, row-major.
  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  /// Number of ticks since construction.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn reseeder(&self) -> &Reseeder {
    &self.reseeder
  }

  /// Outcome of the reseeder on the most recent tick.
  pub fn last_seed_outcome(&self) -> Option<SeedOutcome> {
    self.last_outcome
  }

  /// Enables or disables adaptive reseeding.
  pub fn set_reseeding(&mut self, enabled: bool) {
    self.reseeder.set_enabled(enabled);
  }

  /// Replaces the current grid with a fixed pattern.
  pub fn set_cells(&mut self, pattern: &[Cell]) -> Result<(), AutomatonError> {
    if pattern.len() != self.size.len() {
      return Err(AutomatonError::PatternLength {
        expected: self.size.len(),
        actual: pattern.len(),
      });
    }
    if let Some((index, cell)) = pattern
      .iter()
      .enumerate()
      .find(|(_, c)| c.0 > self.live_colors)
    {
      return Err(AutomatonError::PatternCell {
        index,
        value: cell.0,
      });
    }
    self.cells.copy_from_slice(pattern);
    Ok(())
  }

  /// Sets every cell independently to a random state.
  pub fn randomize(&mut self) {
    for cell in &mut self.cells {
      *cell = random_cell(&mut self.rng, self.live_colors);
    }
  }

  /// Advances one generation and returns the new grid.
  pub fn tick(&mut self) -> &[Cell] {
    simulation::step(&self.cells, &mut self.buffer, self.size, self.live_colors);
    let outcome = self
      .reseeder
      .step(&mut self.buffer, self.size, self.live_colors, &mut self.rng);
    self.last_outcome = Some(outcome);
    std::mem::swap(&mut self.cells, &mut self.buffer);
    self.generation += 1;
    &self.cells
  }

  /// Ticks, then draws the new grid to `sink` and presents it.
  pub fn update<S: PixelSink>(&mut self, sink: &mut S, scheme: &ColorScheme) -> Result<(), S::Error> {
    self.tick();
    self.draw(sink, scheme)
  }

  /// Draws the current grid to `sink` and presents it.
  pub fn draw<S: PixelSink>(&self, sink: &mut S, scheme: &ColorScheme) -> Result<(), S::Error> {
    for (i, &cell) in self.cells.iter().enumerate() {
      let (x, y) = self.size.coords(i);
      sink.set(x, y, scheme.color(cell));
    }
    sink.render()
  }

  /// Blanks the display area of `sink`.
  pub fn clear<S: PixelSink>(&self, sink: &mut S) -> Result<(), S::Error> {
    sink.clear(self.size.width(), self.size.height())
  }
}
