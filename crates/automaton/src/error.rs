//! Construction errors.

use crate::cell::MAX_LIVE_COLORS;

/// Rejected automaton parameters or patterns.
#[derive(Debug, Clone, PartialEq)]
pub enum AutomatonError {
  InvalidDimensions { width: usize, height: usize },
  InvalidColorCount(u8),
  InvalidThreshold(f32),
  InvalidDecay(f32),
  PatternLength { expected: usize, actual: usize },
  PatternCell { index: usize, value: u8 },
}

impl std::fmt::Display for AutomatonError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::InvalidDimensions { width, height } => {
        write!(f, "grid {}x{}: width and height must be > 0", width, height)
      }
      Self::InvalidColorCount(k) => {
        write!(f, "live colors = {}; must be in 1..={}", k, MAX_LIVE_COLORS)
      }
      Self::InvalidThreshold(t) => {
        write!(f, "seed threshold = {}; must be in range [0.0, 1.0]", t)
      }
      Self::InvalidDecay(d) => write!(f, "seed threshold decay = {}; must be >= 0", d),
      Self::PatternLength { expected, actual } => {
        write!(f, "pattern has {} cells; grid has {}", actual, expected)
      }
      Self::PatternCell { index, value } => {
        write!(f, "pattern cell {} = {}; not a valid state", index, value)
      }
    }
  }
}

impl std::error::Error for AutomatonError {}
