//! Adaptive reseeding.
//!
//! A grid left alone settles into still lifes and oscillators or dies out.
//! The [`Reseeder`] watches the fraction of "dead zones" (dead cells whose
//! whole neighborhood is dead) and revives one of them once that fraction
//! reaches a threshold. The threshold erodes while nothing happens, so a
//! seed event eventually fires, and a cooldown follows each event.

use log::debug;
use rand::Rng;

use crate::cell::{Cell, random_cell};
use crate::coords::GridSize;
use crate::simulation::neighbors_all_dead;

/// Reseeding parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedConfig {
  /// Dead-zone fraction (0.0 - 1.0) that triggers a seed event.
  pub threshold: f32,
  /// Amount subtracted from the threshold per decay step.
  pub threshold_decay: f32,
  /// Ticks to wait between decay steps.
  pub threshold_decay_ticks: u32,
  /// Ticks after a seed event during which no seeding happens.
  pub cooldown_ticks: u32,
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      threshold: 0.5,
      threshold_decay: 0.05,
      threshold_decay_ticks: 5,
      cooldown_ticks: 2,
    }
  }
}

/// What the reseeder did on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeedOutcome {
  /// Reseeding is switched off.
  Disabled,
  /// Still cooling down after a seed event.
  Cooldown { remaining: u32 },
  /// Every dead cell has a live neighbor.
  NoDeadZones,
  /// The dead zone at `zone` and its neighbors were randomized.
  Seeded { zone: usize, fraction: f32 },
  /// Below threshold, waiting before the next decay step.
  Waiting { remaining: u32 },
  /// Below threshold, threshold lowered.
  Decayed { threshold: f32 },
}

/// Threshold, decay and cooldown state carried between ticks.
#[derive(Clone, Debug)]
pub struct Reseeder {
  config: SeedConfig,
  threshold: f32,
  decay_delay: u32,
  cooldown: u32,
  enabled: bool,
  dead_zones: Vec<usize>,
}

impl Reseeder {
  pub fn new(config: SeedConfig) -> Self {
    Self {
      config,
      threshold: config.threshold,
      decay_delay: 0,
      cooldown: 0,
      enabled: true,
      dead_zones: Vec::new(),
    }
  }

  pub fn config(&self) -> &SeedConfig {
    &self.config
  }

  /// Current seed threshold.
  pub fn threshold(&self) -> f32 {
    self.threshold
  }

  /// Ticks left before the next decay step.
  pub fn decay_delay(&self) -> u32 {
    self.decay_delay
  }

  /// Ticks left before seeding is allowed again.
  pub fn cooldown(&self) -> u32 {
    self.cooldown
  }

  /// Dead zones found on the last scan.
  pub fn dead_zones(&self) -> &[usize] {
    &self.dead_zones
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn set_enabled(&mut self, enabled: bool) {
    self.enabled = enabled;
  }

  /// Runs one controller step against the freshly computed buffer.
  pub fn step<R: Rng + ?Sized>(
    &mut self,
    cells: &mut [Cell],
    size: GridSize,
    live_colors: u8,
    rng: &mut R,
  ) -> SeedOutcome {
    if !self.enabled {
      return SeedOutcome::Disabled;
    }

    if self.cooldown > 0 {
      self.cooldown -= 1;
      debug!(target: "seed", "cooldown = {}", self.cooldown);
      return SeedOutcome::Cooldown {
        remaining: self.cooldown,
      };
    }

    let zones = self.scan_dead_zones(cells, size);
    if zones == 0 {
      return SeedOutcome::NoDeadZones;
    }

    let fraction = zones as f32 / size.len() as f32;
    let SeedConfig {
      threshold,
      threshold_decay,
      threshold_decay_ticks,
      cooldown_ticks,
    } = self.config;

    if fraction >= self.threshold || self.threshold < threshold_decay {
      debug!(target: "seed", "dead zones = {fraction}; seeding");
      let zone = self.seed_dead_zone(cells, size, live_colors, rng);
      self.threshold = threshold;
      self.decay_delay = threshold_decay_ticks;
      self.cooldown = cooldown_ticks;
      SeedOutcome::Seeded { zone, fraction }
    } else if self.decay_delay > 0 {
      self.decay_delay -= 1;
      debug!(target: "seed", "decay delay = {}", self.decay_delay);
      SeedOutcome::Waiting {
        remaining: self.decay_delay,
      }
    } else {
      self.threshold -= threshold_decay;
      self.decay_delay = threshold_decay_ticks;
      debug!(target: "seed", "threshold = {}", self.threshold);
      SeedOutcome::Decayed {
        threshold: self.threshold,
      }
    }
  }

  /// Collects every dead cell with an all-dead neighborhood.
  fn scan_dead_zones(&mut self, cells: &[Cell], size: GridSize) -> usize {
    self.dead_zones.clear();
    self.dead_zones.extend(
      (0..size.len()).filter(|&i| cells[i].is_dead() && neighbors_all_dead(cells, size, i)),
    );
    self.dead_zones.len()
  }

  /// Randomizes one dead zone and its neighbors. Returns the zone index.
  fn seed_dead_zone<R: Rng + ?Sized>(
    &self,
    cells: &mut [Cell],
    size: GridSize,
    live_colors: u8,
    rng: &mut R,
  ) -> usize {
    let zone = self.dead_zones[rng.random_range(0..self.dead_zones.len())];
    cells[zone] = random_cell(rng, live_colors);
    for n in size.neighbors(zone) {
      cells[n] = random_cell(rng, live_colors);
    }
    zone
  }
}
