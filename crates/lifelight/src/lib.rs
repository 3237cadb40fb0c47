//! Colored Game of Life light display.
//!
//! Wires a [`lifelight_automaton::Automaton`] to a pixel sink, drives it at
//! a fixed tick rate and switches the display on and off following a weekly
//! [`schedule::Schedule`].

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod palette;
pub mod schedule;
pub mod sink;

pub use config::{Config, ConfigError, SinkKind};
pub use driver::{
  Driver, HandoffClosed, HandoffReceiver, HandoffSender, RunStats, ScheduleWatcher, handoff, schedule_from_config,
  spawn_schedule_watcher,
};
pub use error::AppError;
pub use palette::{PaletteError, PaletteKind};
pub use schedule::{ClockTime, Schedule, ScheduleSource, Transition};
pub use sink::{HeadlessSink, TerminalSink};

/// Runs the display described by `config` until `max_ticks` (forever when
/// `None`).
///
/// The sink is acquired here and released when this returns.
pub fn run(config: &Config, sink: SinkKind, max_ticks: Option<u64>) -> Result<RunStats, AppError> {
  let mut driver = Driver::from_config(config)?;

  let watcher = schedule_from_config(config).map(|s| spawn_schedule_watcher(s, config.check_interval()));
  let (_idle_tx, idle_rx) = handoff();
  let toggles = watcher.as_ref().map_or(&idle_rx, ScheduleWatcher::toggles);

  let (width, height) = (config.display.width, config.display.height);
  let stats = match sink {
    SinkKind::Terminal => {
      let mut sink = TerminalSink::stdout(width, height)?;
      driver.run(&mut sink, toggles, max_ticks)?
    }
    SinkKind::Headless => {
      let mut sink = HeadlessSink::new(width, height);
      driver.run(&mut sink, toggles, max_ticks)?
    }
  };

  Ok(stats)
}
