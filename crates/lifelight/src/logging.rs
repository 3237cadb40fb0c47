//! Logger setup.
//!
//! Every log line carries one of the [`DOMAINS`] as its target, so debug
//! output can be enabled per domain.

use env_logger::{Builder, Env};
use log::{LevelFilter, warn};

/// Log targets used across the crate.
pub const DOMAINS: [&str; 5] = ["config", "schedule", "seed", "color", "driver"];

/// Installs the global logger on stderr.
///
/// The base level is `info` unless `RUST_LOG` says otherwise. Each entry of
/// `debug` turns on debug output for that domain; `all` enables every one.
pub fn init(debug: &[String]) {
  let mut builder = builder(debug);
  if builder.try_init().is_err() {
    return;
  }

  for domain in debug.iter().map(|d| d.trim()) {
    if !domain.is_empty() && domain != "all" && !DOMAINS.contains(&domain) {
      warn!("unknown debug domain '{}'", domain);
    }
  }
}

fn builder(debug: &[String]) -> Builder {
  let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
  for domain in debug.iter().map(|d| d.trim()) {
    if domain == "all" {
      for d in DOMAINS {
        builder.filter_module(d, LevelFilter::Debug);
      }
    } else if !domain.is_empty() {
      builder.filter_module(domain, LevelFilter::Debug);
    }
  }
  builder
}

#[cfg(test)]
mod tests {
  use log::{Level, Log, Metadata};

  use super::*;

  fn enabled(logger: &impl Log, target: &str, level: Level) -> bool {
    logger.enabled(&Metadata::builder().target(target).level(level).build())
  }

  #[test]
  fn debug_only_for_listed_domains() {
    let logger = builder(&["seed".to_string(), " schedule ".to_string()]).build();
    assert!(enabled(&logger, "seed", Level::Debug));
    assert!(enabled(&logger, "schedule", Level::Debug));
    assert!(!enabled(&logger, "config", Level::Debug));
    assert!(enabled(&logger, "config", Level::Info));
  }

  #[test]
  fn all_enables_every_domain() {
    let logger = builder(&["all".to_string()]).build();
    for domain in DOMAINS {
      assert!(enabled(&logger, domain, Level::Debug), "{domain}");
    }
  }
}
