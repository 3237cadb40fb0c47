//! Time-of-day on/off schedule.
//!
//! Each weekday carries a list of transitions ("switch on at 08:00", "switch
//! off at 08:45") sorted by time. The display state at a given moment is the
//! state of the last transition at or before it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use log::{debug, info, warn};

use crate::config::WindowConfig;

/// All weekdays in display order.
pub const WEEKDAYS: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

/// Parses a three-letter day name (`Mon` .. `Sun`).
pub fn parse_day(name: &str) -> Option<Weekday> {
  WEEKDAYS.into_iter().find(|&d| day_name(d) == name)
}

/// Three-letter name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "Mon",
    Weekday::Tue => "Tue",
    Weekday::Wed => "Wed",
    Weekday::Thu => "Thu",
    Weekday::Fri => "Fri",
    Weekday::Sat => "Sat",
    Weekday::Sun => "Sun",
  }
}

/// Wall-clock time with minute resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
  pub hour: u8,
  pub minute: u8,
}

impl ClockTime {
  /// Creates a time, or `None` if out of range.
  pub const fn new(hour: u8, minute: u8) -> Option<Self> {
    if hour < 24 && minute < 60 {
      Some(Self { hour, minute })
    } else {
      None
    }
  }
}

/// Malformed `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockParseError(pub String);

impl fmt::Display for ClockParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid time '{}'; expected HH:MM", self.0)
  }
}

impl std::error::Error for ClockParseError {}

impl FromStr for ClockTime {
  type Err = ClockParseError;

  /// Accepts `H:MM` or `HH:MM`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = || ClockParseError(s.to_string());
    let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
    let field = |part: &str| -> Option<u8> {
      if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
      }
      part.parse().ok()
    };
    let hour = field(h).ok_or_else(err)?;
    let minute = field(m).ok_or_else(err)?;
    ClockTime::new(hour, minute).ok_or_else(err)
  }
}

impl fmt::Display for ClockTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", self.hour, self.minute)
  }
}

/// A scheduled switch to `on` (true) or off (false).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
  pub at: ClockTime,
  pub on: bool,
}

/// Anything that decides whether the display should be lit.
pub trait ScheduleSource: Send + Sync {
  /// Returns the display state for `day` at `time`, given the current state.
  fn evaluate(&self, day: Weekday, time: ClockTime, current: bool) -> bool;
}

/// Per-day transition lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
  days: HashMap<Weekday, Vec<Transition>>,
}

impl Schedule {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a schedule from configured windows.
  ///
  /// A window naming an unknown day or carrying a malformed time is logged
  /// and skipped.
  pub fn from_windows(windows: &[WindowConfig]) -> Self {
    let mut schedule = Self::new();

    for (i, window) in windows.iter().enumerate() {
      let name = window
        .name
        .clone()
        .unwrap_or_else(|| format!("window {}", i + 1));

      let days = match &window.days {
        None => WEEKDAYS.to_vec(),
        Some(names) => {
          let parsed: Option<Vec<Weekday>> = names.iter().map(|d| parse_day(d.trim())).collect();
          match parsed {
            Some(days) => days,
            None => {
              let bad = names.iter().find(|d| parse_day(d.trim()).is_none());
              warn!(target: "config", "schedule '{}': invalid day '{}'", name, bad.map_or("", |d| d.as_str()));
              continue;
            }
          }
        }
      };

      let parse = |value: &Option<String>| -> Result<Option<ClockTime>, ClockParseError> {
        value.as_deref().map(str::parse::<ClockTime>).transpose()
      };
      let (off, on) = match (parse(&window.off), parse(&window.on)) {
        (Ok(off), Ok(on)) => (off, on),
        (Err(e), _) | (_, Err(e)) => {
          warn!(target: "config", "schedule '{}': {}", name, e);
          continue;
        }
      };

      schedule.add_window(&days, on, off);

      let show = |t: Option<ClockTime>| t.map_or_else(|| "-".to_string(), |t| t.to_string());
      let day_list: Vec<&str> = days.iter().map(|&d| day_name(d)).collect();
      debug!(
        target: "config",
        "{}: on {}, off {} ({})",
        name,
        show(on),
        show(off),
        day_list.join(", ")
      );
    }

    schedule
  }

  /// Adds an off and/or on transition to each of `days`.
  pub fn add_window(&mut self, days: &[Weekday], on: Option<ClockTime>, off: Option<ClockTime>) {
    let transitions = [(off, false), (on, true)];
    for &day in days {
      let list = self.days.entry(day).or_default();
      for (at, state) in transitions {
        if let Some(at) = at {
          list.push(Transition { at, on: state });
        }
      }
      // Stable, so equal times keep insertion order.
      list.sort_by_key(|t| t.at);
    }
  }

  /// Sorted transitions for `day`.
  pub fn transitions(&self, day: Weekday) -> &[Transition] {
    self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Whether any window covers `day`.
  pub fn has_day(&self, day: Weekday) -> bool {
    self.days.contains_key(&day)
  }

  /// Number of days with at least one transition.
  pub fn day_count(&self) -> usize {
    self.days.len()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }
}

impl ScheduleSource for Schedule {
  fn evaluate(&self, day: Weekday, time: ClockTime, current: bool) -> bool {
    let Some(transitions) = self.days.get(&day) else {
      return current;
    };

    debug!(target: "schedule", "day = {}, time = {}", day_name(day), time);

    let last = transitions.iter().take_while(|t| t.at <= time).last();
    let state = last.map_or(current, |t| t.on);

    if let Some(t) = last {
      if state != current {
        info!(target: "schedule", "{} @ {}", if state { "on" } else { "off" }, t.at);
      }
    }

    state
  }
}
