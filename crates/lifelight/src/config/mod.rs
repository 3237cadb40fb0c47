//! Device configuration loaded from TOML.

mod error;

use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use lifelight_automaton::{AutomatonConfig, ColorScheme, GridSize, MAX_LIVE_COLORS, Rgba, SeedConfig};
use log::{debug, info};
use serde::Deserialize;

pub use error::ConfigError;

use crate::palette::PaletteKind;

/// Used when no path is given on the command line or in the environment.
pub const DEFAULT_PATH: &str = "/etc/lifelight.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
  pub ticks_per_second: u32,
  pub live_colors: u8,
  /// Fixed RNG seed for reproducible runs.
  pub rng_seed: Option<u64>,
  pub seed: SeedSettings,
  pub color: ColorConfig,
  pub display: DisplayConfig,
  pub schedule: ScheduleConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      ticks_per_second: 12,
      live_colors: 4,
      rng_seed: None,
      seed: SeedSettings::default(),
      color: ColorConfig::default(),
      display: DisplayConfig::default(),
      schedule: ScheduleConfig::default(),
    }
  }
}

/// `[seed]` table.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SeedSettings {
  pub threshold: f32,
  pub threshold_decay: f32,
  pub threshold_decay_ticks: u32,
  pub cooldown_ticks: u32,
}

impl Default for SeedSettings {
  fn default() -> Self {
    let seed = SeedConfig::default();
    Self {
      threshold: seed.threshold,
      threshold_decay: seed.threshold_decay,
      threshold_decay_ticks: seed.threshold_decay_ticks,
      cooldown_ticks: seed.cooldown_ticks,
    }
  }
}

impl From<SeedSettings> for SeedConfig {
  fn from(s: SeedSettings) -> Self {
    SeedConfig {
      threshold: s.threshold,
      threshold_decay: s.threshold_decay,
      threshold_decay_ticks: s.threshold_decay_ticks,
      cooldown_ticks: s.cooldown_ticks,
    }
  }
}

/// `[color]` table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
  /// Fixed live colors as `#rrggbb`. Empty means generated palettes.
  pub scheme: Vec<String>,
  pub palettes: Vec<PaletteKind>,
  pub regenerate_on_schedule: bool,
}

impl Default for ColorConfig {
  fn default() -> Self {
    Self {
      scheme: Vec::new(),
      palettes: vec![PaletteKind::Happy, PaletteKind::Soft, PaletteKind::Warm],
      regenerate_on_schedule: true,
    }
  }
}

/// Where frames go.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
  /// ANSI truecolor terminal on stdout.
  #[default]
  Terminal,
  /// In-memory frame only.
  Headless,
}

/// `[display]` table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
  pub width: usize,
  pub height: usize,
  pub sink: SinkKind,
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      width: 32,
      height: 32,
      sink: SinkKind::Terminal,
    }
  }
}

/// `[schedule]` table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
  pub enabled: bool,
  pub check_interval_secs: u64,
  pub window: Vec<WindowConfig>,
}

impl Default for ScheduleConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      check_interval_secs: 30,
      window: Vec::new(),
    }
  }
}

/// One `[[schedule.window]]` entry. Missing `days` means every day.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowConfig {
  pub name: Option<String>,
  pub days: Option<Vec<String>>,
  pub on: Option<String>,
  pub off: Option<String>,
}

impl Config {
  /// Reads and validates `path`.
  ///
  /// A missing file is an error only when `must_exist` is set; otherwise the
  /// built-in defaults are returned.
  pub fn load(path: &Path, must_exist: bool) -> Result<Self, ConfigError> {
    let text = match std::fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound && !must_exist => {
        info!(target: "config", "{} not found, using defaults", path.display());
        return Ok(Self::default());
      }
      Err(source) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    let config = Self::from_toml_str(&text)?;
    info!(target: "config", "loaded {}", path.display());
    Ok(config)
  }

  /// Parses and validates a TOML document.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    config.log_values();
    Ok(config)
  }

  /// Checks every value against its allowed range.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.ticks_per_second == 0 {
      return Err(ConfigError::invalid("ticks_per_second", 0, "must be greater than 0"));
    }
    if self.live_colors == 0 || self.live_colors as usize > MAX_LIVE_COLORS {
      return Err(ConfigError::invalid(
        "live_colors",
        self.live_colors,
        format!("must be in 1..={MAX_LIVE_COLORS}"),
      ));
    }

    let seed = &self.seed;
    if !(0.0..=1.0).contains(&seed.threshold) {
      return Err(ConfigError::invalid("seed.threshold", seed.threshold, "must be in [0, 1]"));
    }
    if !seed.threshold_decay.is_finite() || seed.threshold_decay < 0.0 {
      return Err(ConfigError::invalid(
        "seed.threshold_decay",
        seed.threshold_decay,
        "must be 0 or greater",
      ));
    }

    if self.display.width == 0 {
      return Err(ConfigError::invalid("display.width", 0, "must be greater than 0"));
    }
    if self.display.height == 0 {
      return Err(ConfigError::invalid("display.height", 0, "must be greater than 0"));
    }
    if GridSize::new(self.display.width, self.display.height).is_none() {
      return Err(ConfigError::invalid(
        "display",
        format!("{}x{}", self.display.width, self.display.height),
        "too many cells",
      ));
    }

    if self.color.palettes.is_empty() {
      return Err(ConfigError::invalid("color.palettes", "[]", "must not be empty"));
    }
    self.fixed_scheme()?;

    if self.schedule.check_interval_secs == 0 {
      return Err(ConfigError::invalid(
        "schedule.check_interval_secs",
        0,
        "must be greater than 0",
      ));
    }

    Ok(())
  }

  /// The configured fixed color scheme, if any.
  pub fn fixed_scheme(&self) -> Result<Option<ColorScheme>, ConfigError> {
    let scheme = &self.color.scheme;
    if scheme.is_empty() {
      return Ok(None);
    }
    if scheme.len() != self.live_colors as usize {
      return Err(ConfigError::invalid(
        "color.scheme",
        format!("{} colors", scheme.len()),
        format!("must hold exactly live_colors ({}) entries", self.live_colors),
      ));
    }

    let colors = scheme
      .iter()
      .map(|s| parse_hex(s).ok_or_else(|| ConfigError::invalid("color.scheme", s, "expected #rrggbb")))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(ColorScheme::from_live(&colors)))
  }

  /// Palettes regenerate only when no fixed scheme is set.
  pub fn regenerates_palette(&self) -> bool {
    self.color.regenerate_on_schedule && self.color.scheme.is_empty()
  }

  pub fn automaton_config(&self) -> AutomatonConfig {
    AutomatonConfig {
      width: self.display.width,
      height: self.display.height,
      live_colors: self.live_colors,
      seed: self.seed.into(),
    }
  }

  pub fn tick_interval(&self) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second.max(1)))
  }

  pub fn check_interval(&self) -> Duration {
    Duration::from_secs(self.schedule.check_interval_secs)
  }

  fn log_values(&self) {
    debug!(target: "config", "ticks_per_second = {}", self.ticks_per_second);
    debug!(target: "config", "live_colors = {}", self.live_colors);
    debug!(target: "config", "seed = {:?}", self.seed);
    debug!(target: "config", "color = {:?}", self.color);
    debug!(target: "config", "display = {:?}", self.display);
    debug!(
      target: "config",
      "schedule enabled = {}, check every {}s, {} windows",
      self.schedule.enabled,
      self.schedule.check_interval_secs,
      self.schedule.window.len()
    );
  }
}

/// Parses `#rrggbb` (the `#` is optional).
pub fn parse_hex(s: &str) -> Option<Rgba> {
  let s = s.trim().trim_start_matches('#');
  if s.len() != 6 || !s.is_ascii() {
    return None;
  }
  let r = u8::from_str_radix(&s[0..2], 16).ok()?;
  let g = u8::from_str_radix(&s[2..4], 16).ok()?;
  let b = u8::from_str_radix(&s[4..6], 16).ok()?;
  Some(Rgba::rgb(r, g, b))
}
