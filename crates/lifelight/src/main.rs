use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lifelight::config::{Config, DEFAULT_PATH};
use lifelight::{SinkKind, logging};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "lifelight", about = "Colored Game of Life light display")]
struct Cli {
  /// Config file. Must exist when given; otherwise /etc/lifelight.toml is
  /// used if present.
  #[arg(long, env = "LIFELIGHT_CONFIG")]
  config: Option<PathBuf>,

  /// Comma-separated log domains to debug (config, schedule, seed, color,
  /// driver, or all).
  #[arg(long, env = "LIFELIGHT_DEBUG", value_delimiter = ',')]
  debug: Vec<String>,

  /// Overrides `display.sink`.
  #[arg(long, value_enum)]
  sink: Option<SinkKind>,

  /// Stop after this many generations.
  #[arg(long)]
  ticks: Option<u64>,

  /// Overrides `rng_seed`.
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  logging::init(&cli.debug);

  let loaded = match &cli.config {
    Some(path) => Config::load(path, true),
    None => Config::load(Path::new(DEFAULT_PATH), false),
  };
  let mut config = match loaded {
    Ok(config) => config,
    Err(e) => {
      error!(target: "config", "{}", e);
      return ExitCode::FAILURE;
    }
  };

  if cli.seed.is_some() {
    config.rng_seed = cli.seed;
  }
  let sink = cli.sink.unwrap_or(config.display.sink);

  match lifelight::run(&config, sink, cli.ticks) {
    Ok(stats) => {
      info!(target: "driver", "stopped after {} ticks, {} pauses", stats.ticks, stats.pauses);
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("{}", e);
      ExitCode::FAILURE
    }
  }
}
