use std::fmt::Display;
use std::path::PathBuf;

/// Configuration could not be read or is out of range.
#[derive(Debug)]
pub enum ConfigError {
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  Parse(toml::de::Error),
  Invalid {
    key: &'static str,
    value: String,
    constraint: String,
  },
}

impl ConfigError {
  pub(crate) fn invalid(key: &'static str, value: impl Display, constraint: impl Into<String>) -> Self {
    Self::Invalid {
      key,
      value: value.to_string(),
      constraint: constraint.into(),
    }
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "reading {}: {}", path.display(), source),
      Self::Parse(e) => write!(f, "parsing config: {}", e),
      Self::Invalid {
        key,
        value,
        constraint,
      } => write!(f, "{} = {}; {}", key, value, constraint),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse(e) => Some(e),
      Self::Invalid { .. } => None,
    }
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(e: toml::de::Error) -> Self {
    Self::Parse(e)
  }
}
