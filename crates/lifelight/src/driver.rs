//! Tick loop and schedule watcher.
//!
//! The watcher thread evaluates the schedule against local time and hands
//! each on/off change to the tick loop. A handoff is a rendezvous: the
//! watcher blocks until the tick loop has applied the change (cleared the
//! display, or resumed ticking) and acknowledged it.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use async_channel::{Receiver, RecvError, Sender, TryRecvError};
use chrono::{Datelike, Local, Timelike, Weekday};
use lifelight_automaton::{Automaton, ColorScheme, PixelSink};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::error::AppError;
use crate::palette::{PaletteKind, generate_scheme};
use crate::schedule::{ClockTime, Schedule, ScheduleSource};

/// Creates a connected pair of handoff ends.
pub fn handoff() -> (HandoffSender, HandoffReceiver) {
  let (change_tx, change_rx) = async_channel::bounded::<bool>(1);
  let (ack_tx, ack_rx) = async_channel::bounded::<()>(1);
  (
    HandoffSender {
      changes: change_tx,
      acks: ack_rx,
    },
    HandoffReceiver {
      changes: change_rx,
      acks: ack_tx,
    },
  )
}

/// The other end of the handoff went away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandoffClosed;

impl std::fmt::Display for HandoffClosed {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("handoff closed")
  }
}

impl std::error::Error for HandoffClosed {}

/// Schedule side of the handoff.
pub struct HandoffSender {
  changes: Sender<bool>,
  acks: Receiver<()>,
}

impl HandoffSender {
  /// Hands `on` to the tick loop and blocks until it has been applied.
  pub fn send(&self, on: bool) -> Result<(), HandoffClosed> {
    self.changes.send_blocking(on).map_err(|_| HandoffClosed)?;
    self.acks.recv_blocking().map_err(|_| HandoffClosed)
  }

  pub fn is_closed(&self) -> bool {
    self.changes.is_closed()
  }
}

/// Tick loop side of the handoff.
pub struct HandoffReceiver {
  changes: Receiver<bool>,
  acks: Sender<()>,
}

impl HandoffReceiver {
  /// Takes a waiting change without blocking.
  pub fn try_take(&self) -> Result<bool, TryRecvError> {
    self.changes.try_recv()
  }

  /// Waits for the next change.
  pub fn take(&self) -> Result<bool, RecvError> {
    self.changes.recv_blocking()
  }

  /// Releases the sender of the last taken change.
  pub fn ack(&self) {
    // Full only if nothing was taken; closed if the sender is gone.
    let _ = self.acks.try_send(());
  }

  /// Changes handed over but not yet taken.
  pub fn pending(&self) -> usize {
    self.changes.len()
  }
}

/// Background thread feeding schedule changes to the tick loop.
pub struct ScheduleWatcher {
  toggles: HandoffReceiver,
  handle: JoinHandle<()>,
}

impl ScheduleWatcher {
  /// Carries `false` when the display should go dark and `true` when it
  /// should resume.
  pub fn toggles(&self) -> &HandoffReceiver {
    &self.toggles
  }

  /// Drops the receiving end and waits for the thread to notice.
  pub fn join(self) -> thread::Result<()> {
    drop(self.toggles);
    self.handle.join()
  }
}

/// Starts watching `source` against local time every `interval`.
pub fn spawn_schedule_watcher<S>(source: S, interval: Duration) -> ScheduleWatcher
where
  S: ScheduleSource + 'static,
{
  spawn_with_clock(source, interval, local_now)
}

fn local_now() -> (Weekday, ClockTime) {
  let now = Local::now();
  let time = ClockTime {
    hour: now.hour() as u8,
    minute: now.minute() as u8,
  };
  (now.weekday(), time)
}

pub(crate) fn spawn_with_clock<S, C>(source: S, interval: Duration, clock: C) -> ScheduleWatcher
where
  S: ScheduleSource + 'static,
  C: Fn() -> (Weekday, ClockTime) + Send + 'static,
{
  let (tx, rx) = handoff();
  let handle = thread::spawn(move || watch_loop(source, interval, clock, tx));
  ScheduleWatcher { toggles: rx, handle }
}

fn watch_loop<S, C>(source: S, interval: Duration, clock: C, tx: HandoffSender)
where
  S: ScheduleSource,
  C: Fn() -> (Weekday, ClockTime),
{
  let mut state = true;
  loop {
    let (day, time) = clock();
    let next = source.evaluate(day, time, state);
    if next != state {
      state = next;
      if tx.send(state).is_err() {
        break;
      }
    }
    if tx.is_closed() {
      break;
    }
    thread::sleep(interval);
  }
  debug!(target: "driver", "schedule watcher stopped");
}

/// Counters reported by [`Driver::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
  pub ticks: u64,
  pub pauses: u64,
}

/// Owns the automaton and the current colors; drives a sink at a fixed rate.
pub struct Driver {
  automaton: Automaton,
  scheme: ColorScheme,
  palettes: Vec<PaletteKind>,
  regenerate: bool,
  tick_interval: Duration,
  rng: StdRng,
}

impl Driver {
  /// A driver with a fixed color scheme.
  pub fn new(automaton: Automaton, scheme: ColorScheme, tick_interval: Duration) -> Self {
    Self {
      automaton,
      scheme,
      palettes: Vec::new(),
      regenerate: false,
      tick_interval,
      rng: StdRng::seed_from_u64(0),
    }
  }

  /// Generates a fresh palette from `palettes` every time the display goes
  /// dark.
  pub fn with_palette_regeneration(mut self, palettes: Vec<PaletteKind>, rng: StdRng) -> Self {
    self.regenerate = !palettes.is_empty();
    self.palettes = palettes;
    self.rng = rng;
    self
  }

  /// Builds the automaton and colors described by `config` and fills the
  /// grid with random cells.
  pub fn from_config(config: &Config) -> Result<Self, AppError> {
    let mut rng = match config.rng_seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };

    let mut automaton = Automaton::new(config.automaton_config(), StdRng::seed_from_u64(rng.random()))?;
    automaton.randomize();

    let live = config.live_colors as usize;
    let scheme = match config.fixed_scheme()? {
      Some(scheme) => scheme,
      None => generate_scheme(&config.color.palettes, live, &mut rng),
    };

    let driver = Self::new(automaton, scheme, config.tick_interval());
    Ok(if config.regenerates_palette() {
      driver.with_palette_regeneration(config.color.palettes.clone(), rng)
    } else {
      driver
    })
  }

  pub fn automaton(&self) -> &Automaton {
    &self.automaton
  }

  pub fn scheme(&self) -> &ColorScheme {
    &self.scheme
  }

  /// Ticks until `max_ticks` (forever when `None`).
  ///
  /// An `off` change from `toggles` clears the sink and blocks until `on`
  /// arrives or the sender is gone. Every taken change is acknowledged once
  /// applied. A sink error stops the run and is returned as is.
  pub fn run<S: PixelSink>(
    &mut self,
    sink: &mut S,
    toggles: &HandoffReceiver,
    max_ticks: Option<u64>,
  ) -> Result<RunStats, S::Error> {
    let mut stats = RunStats::default();
    let mut deadline = Instant::now();

    while max_ticks.is_none_or(|max| stats.ticks < max) {
      match toggles.try_take() {
        Ok(false) => {
          self.pause(sink, toggles)?;
          stats.pauses += 1;
          deadline = Instant::now();
        }
        Ok(true) => toggles.ack(),
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {}
      }

      self.automaton.update(sink, &self.scheme)?;
      stats.ticks += 1;

      deadline += self.tick_interval;
      let now = Instant::now();
      if deadline > now {
        thread::sleep(deadline - now);
      } else {
        deadline = now;
      }
    }

    Ok(stats)
  }

  fn pause<S: PixelSink>(&mut self, sink: &mut S, toggles: &HandoffReceiver) -> Result<(), S::Error> {
    info!(target: "driver", "display off after {} generations", self.automaton.generation());
    let cleared = self.automaton.clear(sink);
    if cleared.is_ok() && self.regenerate {
      let live = self.automaton.live_colors() as usize;
      self.scheme = generate_scheme(&self.palettes, live, &mut self.rng);
    }
    toggles.ack();
    cleared?;

    loop {
      match toggles.take() {
        Ok(true) => {
          toggles.ack();
          info!(target: "driver", "display on");
          return Ok(());
        }
        Ok(false) => toggles.ack(),
        Err(_) => {
          warn!(target: "driver", "schedule watcher gone; resuming");
          return Ok(());
        }
      }
    }
  }
}

/// Builds the schedule from `config`, or `None` when scheduling is off or no
/// window is usable.
pub fn schedule_from_config(config: &Config) -> Option<Schedule> {
  if !config.schedule.enabled {
    return None;
  }
  let schedule = Schedule::from_windows(&config.schedule.window);
  if schedule.is_empty() {
    debug!(target: "schedule", "no windows; display stays on");
    return None;
  }
  Some(schedule)
}
