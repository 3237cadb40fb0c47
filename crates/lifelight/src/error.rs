use std::convert::Infallible;

use lifelight_automaton::AutomatonError;

use crate::config::ConfigError;

/// Anything that stops the display from starting or running.
#[derive(Debug)]
pub enum AppError {
  Config(ConfigError),
  Automaton(AutomatonError),
  Sink(std::io::Error),
}

impl std::fmt::Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Config(e) => write!(f, "config: {}", e),
      Self::Automaton(e) => write!(f, "automaton: {}", e),
      Self::Sink(e) => write!(f, "display: {}", e),
    }
  }
}

impl std::error::Error for AppError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Config(e) => Some(e),
      Self::Automaton(e) => Some(e),
      Self::Sink(e) => Some(e),
    }
  }
}

impl From<ConfigError> for AppError {
  fn from(e: ConfigError) -> Self {
    Self::Config(e)
  }
}

impl From<AutomatonError> for AppError {
  fn from(e: AutomatonError) -> Self {
    Self::Automaton(e)
  }
}

impl From<std::io::Error> for AppError {
  fn from(e: std::io::Error) -> Self {
    Self::Sink(e)
  }
}

impl From<Infallible> for AppError {
  fn from(e: Infallible) -> Self {
    match e {}
  }
}
